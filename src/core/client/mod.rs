//! Public client surface + builder.
//! Internals are split into `constants` (UA + defaults) and `retry` (step retry policy, cache modes).

mod constants;
mod retry;

pub use retry::{Backoff, CacheMode, RetryConfig};

use crate::core::FhError;
use crate::core::cache::{MemoryCache, ResponseCache};
use constants::{
    DEFAULT_BASE_URL, DEFAULT_CACHE_TTL, DEFAULT_TIMEOUT, ENV_API_KEY, ENV_BASE_URL, USER_AGENT,
};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Handle to the Finnhub API.
///
/// Build it once at startup with [`FhClient::builder`] and pass it (or clones
/// of it; cloning is cheap and shares the connection pool and cache) to the
/// code that needs it.
#[derive(Debug, Clone)]
pub struct FhClient {
    http: Client,
    base_url: Url,
    api_key: String,
    cache: Option<Arc<dyn ResponseCache>>,
    default_ttl: Duration,
}

impl FhClient {
    /// Create a new builder.
    pub fn builder() -> FhClientBuilder {
        FhClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Builds the URL for `path` with `params`, appending the API token last.
    pub(crate) fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, FhError> {
        let mut url = self.base_url.join(path)?;
        {
            let mut qp = url.query_pairs_mut();
            for (k, v) in params {
                qp.append_pair(k, v);
            }
            qp.append_pair("token", &self.api_key);
        }
        Ok(url)
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    pub(crate) async fn cache_get(&self, url: &Url) -> Option<String> {
        let store = self.cache.as_ref()?;
        store.get(url.as_str()).await
    }

    pub(crate) async fn cache_put(&self, url: &Url, body: &str, ttl_override: Option<Duration>) {
        let Some(store) = &self.cache else {
            return;
        };
        let ttl = ttl_override.unwrap_or(self.default_ttl);
        store.put(url.as_str(), body.to_string(), ttl).await;
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct FhClientBuilder {
    api_key: Option<String>,
    base_url: Option<Url>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    cache_ttl: Option<Duration>,
    cache: Option<Arc<dyn ResponseCache>>,
    disable_cache: bool,
}

impl FhClientBuilder {
    /// Starts a builder from `FINNHUB_API_KEY` and, if set, `FINNHUB_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns `FhError::Url` if `FINNHUB_BASE_URL` is set but not a valid URL.
    pub fn from_env() -> Result<Self, FhError> {
        let mut b = Self::default();
        if let Ok(key) = std::env::var(ENV_API_KEY) {
            b.api_key = Some(key);
        }
        if let Ok(base) = std::env::var(ENV_BASE_URL) {
            b.base_url = Some(Url::parse(&base)?);
        }
        Ok(b)
    }

    /// Set the Finnhub API token. Required.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the API base (e.g., `https://finnhub.io/api/v1/`).
    ///
    /// A missing trailing `/` is added so endpoint paths join under it.
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set a global request timeout (overall). Default: 5 seconds.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// TTL for cached responses whose caller does not pass one.
    pub fn cache_ttl(mut self, dur: Duration) -> Self {
        self.cache_ttl = Some(dur);
        self
    }

    /// Use a custom response cache instead of the in-memory default.
    pub fn cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self.disable_cache = false;
        self
    }

    /// Turn response caching off; every call hits the network.
    pub fn no_cache(mut self) -> Self {
        self.cache = None;
        self.disable_cache = true;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns `FhError::Config` if no API key was provided, or `FhError::Http`
    /// if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<FhClient, FhError> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| FhError::Config(format!("missing API key (set {ENV_API_KEY})")))?;

        let mut base_url = match self.base_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT));
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }
        let http = httpb.build()?;

        let cache = if self.disable_cache {
            None
        } else {
            Some(
                self.cache
                    .unwrap_or_else(|| Arc::new(MemoryCache::new()) as Arc<dyn ResponseCache>),
            )
        };

        Ok(FhClient {
            http,
            base_url,
            api_key,
            cache,
            default_ttl: self.cache_ttl.unwrap_or(DEFAULT_CACHE_TTL),
        })
    }
}
