//! Response cache used by cacheable fetches.
//!
//! The client only needs two operations, so the cache is a small trait
//! object. [`MemoryCache`] is the process-local default; tests and callers
//! can swap in their own implementation through
//! [`FhClientBuilder::cache`](crate::core::client::FhClientBuilder::cache).

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

/// Boxed future returned by [`ResponseCache`] methods.
pub type CacheFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A duration-bounded key/value store for raw response bodies.
///
/// Keys are request URLs. Concurrent writers race with last-writer-wins
/// semantics; a stored value may be reused until its TTL elapses.
pub trait ResponseCache: Debug + Send + Sync {
    /// Returns the stored body if present and not expired.
    fn get<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<String>>;

    /// Stores `value` under `key` for `ttl`.
    fn put<'a>(&'a self, key: &'a str, value: String, ttl: Duration) -> CacheFuture<'a, ()>;
}

#[derive(Debug)]
struct CacheEntry {
    body: String,
    expires_at: Instant,
}

/// In-memory [`ResponseCache`] backed by a `RwLock<HashMap>`.
///
/// Every write sweeps out expired entries, so the map only holds live
/// entries plus whatever expired since the last write.
#[derive(Debug, Default)]
pub struct MemoryCache {
    map: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.map.read().await.len()
    }

    /// Whether the cache holds no entries at all.
    pub async fn is_empty(&self) -> bool {
        self.map.read().await.is_empty()
    }

    /// Removes every expired entry.
    pub async fn purge_expired(&self) {
        let now = Instant::now();
        self.map.write().await.retain(|_, e| e.expires_at > now);
    }
}

impl ResponseCache for MemoryCache {
    fn get<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<String>> {
        Box::pin(async move {
            let guard = self.map.read().await;
            guard
                .get(key)
                .filter(|entry| Instant::now() < entry.expires_at)
                .map(|entry| entry.body.clone())
        })
    }

    fn put<'a>(&'a self, key: &'a str, value: String, ttl: Duration) -> CacheFuture<'a, ()> {
        Box::pin(async move {
            let now = Instant::now();
            let mut map = self.map.write().await;
            map.retain(|_, e| e.expires_at > now);
            map.insert(
                key.to_string(),
                CacheEntry {
                    body: value,
                    expires_at: now + ttl,
                },
            );
        })
    }
}
