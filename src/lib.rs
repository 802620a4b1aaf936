//! # stockwatch
//!
//! Data layer of a stock dashboard, backed by the Finnhub REST API.
//!
//! - [`news`]: bounded, validated market news, personalized by watchlist symbols
//!   or general when there are none.
//! - [`search`]: stock search annotated with watchlist membership.
//! - [`digest`]: per-user news collection for the scheduled daily email.
//! - [`watchlist`]: the watchlist store seam and an in-memory implementation.
//! - [`format`]: display helpers for templates.
//!
//! ## Quick start
//!
//! ```no_run
//! use stockwatch::{FhClient, NewsBuilder};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = FhClient::builder().api_key("your-token").build()?;
//!
//! let news = NewsBuilder::new(&client)
//!     .symbols(["AAPL", "MSFT"])
//!     .fetch()
//!     .await?;
//! for article in news {
//!     println!("{} ({})", article.headline, article.related);
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod digest;
pub mod format;
pub mod news;
pub mod search;
pub mod watchlist;

pub use crate::core::{
    Backoff, CacheMode, DateRange, FhClient, FhClientBuilder, FhError, MemoryCache, NewsService,
    ResponseCache, RetryConfig, ServiceFuture,
};
pub use digest::{DailyDigest, User, UserNews};
pub use news::{FormattedArticle, NewsBuilder, RawArticle, get_news};
pub use search::{SearchBuilder, StockSummary, search_stocks};
pub use watchlist::{InMemoryWatchlist, WatchlistStore};

#[cfg(feature = "tracing-subscriber")]
/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
/// Intended for demos and tests; a no-op if a subscriber is already set.
pub fn init_tracing_for_tests() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
