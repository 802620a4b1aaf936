//! Watchlist lookups used by search annotation and the daily digest.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::core::{FhError, ServiceFuture};

/// Read access to users' watchlists.
///
/// Implement this over whatever database holds the watchlists; the crate
/// only needs symbols by user email.
pub trait WatchlistStore: Send + Sync {
    /// The symbols on the watchlist of the user with `email`, in insertion
    /// order. An unknown user has an empty watchlist.
    fn symbols_by_email<'a>(&'a self, email: &'a str) -> ServiceFuture<'a, Vec<String>>;
}

/// A process-local [`WatchlistStore`].
///
/// Symbols are stored trimmed and uppercased, once per user.
#[derive(Debug, Default)]
pub struct InMemoryWatchlist {
    lists: RwLock<HashMap<String, Vec<String>>>,
}

fn normalize(symbol: &str) -> Result<String, FhError> {
    let s = symbol.trim().to_uppercase();
    if s.is_empty() {
        return Err(FhError::InvalidParams("watchlist symbol must not be blank".into()));
    }
    Ok(s)
}

impl InMemoryWatchlist {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `symbol` to the watchlist of `email`. Returns `false` if it was already there.
    ///
    /// # Errors
    ///
    /// Returns `FhError::InvalidParams` for a blank symbol.
    pub async fn add(&self, email: &str, symbol: &str) -> Result<bool, FhError> {
        let symbol = normalize(symbol)?;
        let mut lists = self.lists.write().await;
        let list = lists.entry(email.trim().to_string()).or_default();
        if list.contains(&symbol) {
            return Ok(false);
        }
        list.push(symbol);
        Ok(true)
    }

    /// Removes `symbol` from the watchlist of `email`. Returns `false` if it was not there.
    pub async fn remove(&self, email: &str, symbol: &str) -> bool {
        let Ok(symbol) = normalize(symbol) else {
            return false;
        };
        let mut lists = self.lists.write().await;
        let Some(list) = lists.get_mut(email.trim()) else {
            return false;
        };
        let before = list.len();
        list.retain(|s| *s != symbol);
        list.len() != before
    }

    /// Whether `symbol` is on the watchlist of `email`.
    pub async fn contains(&self, email: &str, symbol: &str) -> bool {
        let symbol = symbol.trim().to_uppercase();
        self.lists
            .read()
            .await
            .get(email.trim())
            .is_some_and(|list| list.contains(&symbol))
    }
}

impl WatchlistStore for InMemoryWatchlist {
    fn symbols_by_email<'a>(&'a self, email: &'a str) -> ServiceFuture<'a, Vec<String>> {
        Box::pin(async move {
            Ok(self
                .lists
                .read()
                .await
                .get(email.trim())
                .cloned()
                .unwrap_or_default())
        })
    }
}
