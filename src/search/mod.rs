use std::collections::HashSet;
use std::time::Duration;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::client::CacheMode;
use crate::core::{FhClient, FhError, net};

/// Symbols shown when the search box is empty, most popular first.
pub const POPULAR_STOCK_SYMBOLS: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "TSLA", "META", "NVDA", "NFLX", "ORCL", "CRM", "ADBE",
    "INTC", "AMD", "PYPL", "UBER", "SHOP", "SPOT", "JPM", "V", "DIS",
];

/// How many popular symbols are looked up for an empty query.
pub const POPULAR_LOOKUPS: usize = 10;
/// Maximum number of results returned by a search.
pub const MAX_RESULTS: usize = 15;

const PROFILE_TTL: Duration = Duration::from_secs(60 * 60);
const SEARCH_TTL: Duration = Duration::from_secs(30 * 60);

/// A stock search hit, annotated with the caller's watchlist membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockSummary {
    /// Uppercased ticker.
    pub symbol: String,
    /// Company or instrument name.
    pub name: String,
    /// Ticker as the provider displays it.
    pub display_symbol: String,
    /// Listing exchange; `"US"` when the provider does not report one.
    pub exchange: String,
    /// Instrument type (e.g. "Common Stock").
    pub kind: String,
    /// Whether `symbol` is on the caller's watchlist.
    pub is_in_watchlist: bool,
}

/* ---------------- Public API ---------------- */

/// Searches stocks for `query`, or lists popular stocks when `query` is `None` or empty.
///
/// Provider failures never surface here; see [`SearchBuilder::fetch`].
///
/// # Errors
///
/// Returns `FhError::Url` if the search URL cannot be built.
pub async fn search_stocks<S: AsRef<str>>(
    client: &FhClient,
    query: Option<&str>,
    watchlist: &[S],
) -> Result<Vec<StockSummary>, FhError> {
    let mut builder = SearchBuilder::new(client).watchlist(watchlist);
    if let Some(q) = query {
        builder = builder.query(q);
    }
    builder.fetch().await
}

/// A builder for stock searches.
#[derive(Debug)]
pub struct SearchBuilder {
    client: FhClient,
    query: Option<String>,
    watchlist: HashSet<String>,
    cache_mode: CacheMode,
}

impl SearchBuilder {
    /// Creates a builder that lists popular stocks until a query is set.
    pub fn new(client: &FhClient) -> Self {
        Self {
            client: client.clone(),
            query: None,
            watchlist: HashSet::new(),
            cache_mode: CacheMode::Use,
        }
    }

    /// Sets the free-text query.
    #[must_use]
    pub fn query(mut self, q: impl Into<String>) -> Self {
        self.query = Some(q.into());
        self
    }

    /// Sets the caller's watchlist; matching is case-insensitive.
    #[must_use]
    pub fn watchlist<I, T>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.watchlist = symbols
            .into_iter()
            .map(|s| s.as_ref().trim().to_uppercase())
            .collect();
        self
    }

    /// Sets the cache mode for the calls made by this search.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Executes the search.
    ///
    /// An empty query looks up the first popular symbols concurrently; lookups
    /// that fail are dropped. A query made only of whitespace returns nothing.
    /// A failed or undecodable free-text search is logged and returns nothing.
    ///
    /// # Errors
    ///
    /// Returns `FhError::Url` if the search URL cannot be built from the
    /// client's base URL.
    #[tracing::instrument(skip(self), err, fields(query = ?self.query))]
    pub async fn fetch(self) -> Result<Vec<StockSummary>, FhError> {
        let hits = match self.query.as_deref() {
            None | Some("") => self.popular().await,
            Some(q) if q.trim().is_empty() => Vec::new(),
            Some(q) => {
                let url = self.client.endpoint("search", &[("q", q.trim())])?;
                match self.free_text(&url).await {
                    Ok(hits) => hits,
                    Err(e) => {
                        tracing::warn!(query = %q.trim(), error = %e, "stock search failed");
                        Vec::new()
                    }
                }
            }
        };

        Ok(hits
            .into_iter()
            .take(MAX_RESULTS)
            .map(|hit| {
                let symbol = hit.symbol.to_uppercase();
                StockSummary {
                    is_in_watchlist: self.watchlist.contains(&symbol),
                    symbol,
                    name: hit.name,
                    display_symbol: hit.display_symbol,
                    exchange: hit.exchange,
                    kind: hit.kind,
                }
            })
            .collect())
    }

    async fn popular(&self) -> Vec<Hit> {
        let lookups = POPULAR_STOCK_SYMBOLS
            .iter()
            .take(POPULAR_LOOKUPS)
            .map(|&symbol| async move {
                match self.profile(symbol).await {
                    Ok(hit) => Some(hit),
                    Err(e) => {
                        tracing::debug!(%symbol, error = %e, "profile lookup failed");
                        None
                    }
                }
            });
        join_all(lookups).await.into_iter().flatten().collect()
    }

    async fn profile(&self, symbol: &str) -> Result<Hit, FhError> {
        let url = self.client.endpoint("stock/profile2", &[("symbol", symbol)])?;
        let profile: Profile =
            net::get_json(&self.client, &url, Some(PROFILE_TTL), self.cache_mode).await?;
        Ok(Hit {
            symbol: symbol.to_string(),
            name: profile.name.filter(|n| !n.is_empty()).unwrap_or_else(|| symbol.to_string()),
            display_symbol: symbol.to_string(),
            exchange: profile
                .exchange
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| "US".to_string()),
            kind: "Common Stock".to_string(),
        })
    }

    async fn free_text(&self, url: &Url) -> Result<Vec<Hit>, FhError> {
        let env: SearchEnvelope =
            net::get_json(&self.client, url, Some(SEARCH_TTL), self.cache_mode).await?;

        Ok(env
            .result
            .unwrap_or_default()
            .into_iter()
            .filter_map(|r| {
                let symbol = r.symbol.filter(|s| !s.is_empty())?;
                Some(Hit {
                    name: r.description.unwrap_or_default(),
                    display_symbol: r
                        .display_symbol
                        .filter(|d| !d.is_empty())
                        .unwrap_or_else(|| symbol.clone()),
                    exchange: "US".to_string(),
                    kind: r
                        .kind
                        .filter(|k| !k.is_empty())
                        .unwrap_or_else(|| "Stock".to_string()),
                    symbol,
                })
            })
            .collect())
    }
}

/// Intermediate result shared by both search paths.
struct Hit {
    symbol: String,
    name: String,
    display_symbol: String,
    exchange: String,
    kind: String,
}

/* ------------- Minimal serde mapping of /search and /stock/profile2 ------------- */

#[derive(Deserialize)]
struct SearchEnvelope {
    #[allow(dead_code)]
    count: Option<i64>,
    result: Option<Vec<SearchResult>>,
}

#[derive(Deserialize)]
struct SearchResult {
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "displaySymbol")]
    #[serde(default)]
    display_symbol: Option<String>,
    #[serde(default)]
    symbol: Option<String>,
    #[serde(rename = "type")]
    #[serde(default)]
    kind: Option<String>,
}

#[derive(Deserialize)]
struct Profile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    exchange: Option<String>,
}
