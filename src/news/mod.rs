//! Bounded market news for the dashboard and the daily digest.
//!
//! Two modes, picked from the caller's symbols:
//!
//! - **Personalized** (at least one non-blank symbol): company news is fetched
//!   round-robin across the symbols, one provider call per round and at most
//!   [`MAX_ARTICLES`] rounds. The first valid article of each round is kept,
//!   and the collected articles are returned newest first. A failing round is
//!   logged and skipped.
//! - **General** (no usable symbols): a single general-news call whose valid
//!   articles are deduplicated and cut to [`MAX_ARTICLES`], in provider order.
//!   A failing call is an error.

mod api;
mod model;
mod wire;

pub use api::{LOOKBACK_DAYS, MAX_ARTICLES, normalize_symbols};
pub use model::{FormattedArticle, RawArticle};

use chrono::NaiveDate;

use crate::core::{DateRange, FhClient, FhError, NewsService};

/// Fetches news for `symbols`, or general market news when `symbols` is
/// `None`, empty or blank.
///
/// # Errors
///
/// Returns `FhError::NewsUnavailable` if the general-news call fails.
/// Personalized mode never fails; failing rounds are skipped.
pub async fn get_news<S, T>(
    service: &S,
    symbols: Option<&[T]>,
) -> Result<Vec<FormattedArticle>, FhError>
where
    S: NewsService + ?Sized,
    T: AsRef<str>,
{
    api::aggregate(service, symbols, DateRange::lookback_from_now(LOOKBACK_DAYS)).await
}

/// A builder for a single news request.
pub struct NewsBuilder<'a, S: NewsService + ?Sized = FhClient> {
    service: &'a S,
    symbols: Vec<String>,
    as_of: Option<NaiveDate>,
}

impl<'a, S: NewsService + ?Sized> NewsBuilder<'a, S> {
    /// Creates a builder for general news against `service` (usually an [`FhClient`]).
    pub fn new(service: &'a S) -> Self {
        Self {
            service,
            symbols: Vec::new(),
            as_of: None,
        }
    }

    /// Sets the watchlist symbols. Blank entries are ignored; if none remain,
    /// general news is fetched.
    #[must_use]
    pub fn symbols<I, T>(mut self, syms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.symbols = syms.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a single symbol.
    #[must_use]
    pub fn add_symbol(mut self, sym: impl Into<String>) -> Self {
        self.symbols.push(sym.into());
        self
    }

    /// Pins "today" for the lookback window instead of the current UTC date.
    #[must_use]
    pub const fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// The window this request will query.
    pub fn window(&self) -> DateRange {
        match self.as_of {
            Some(today) => DateRange::lookback(LOOKBACK_DAYS, today),
            None => DateRange::lookback_from_now(LOOKBACK_DAYS),
        }
    }

    /// Executes the request.
    ///
    /// # Errors
    ///
    /// Returns `FhError::NewsUnavailable` if general mode is used and the
    /// provider call fails.
    #[tracing::instrument(skip(self), err, fields(symbols = ?self.symbols))]
    pub async fn fetch(self) -> Result<Vec<FormattedArticle>, FhError> {
        let window = self.window();
        api::aggregate(self.service, Some(self.symbols.as_slice()), window).await
    }
}
