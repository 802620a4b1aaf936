use std::future::Future;
use std::pin::Pin;

use crate::core::{DateRange, FhError};
use crate::news::RawArticle;

/// Boxed future returned by service traits.
pub type ServiceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, FhError>> + Send + 'a>>;

/// A source of raw, unvalidated news articles.
///
/// The aggregation engine in [`crate::news`] only talks to this trait, which
/// keeps it independent of HTTP and lets tests script provider responses.
/// It is implemented by [`FhClient`](crate::FhClient).
pub trait NewsService: Send + Sync {
    /// Company news for one symbol published within `window`, in provider order.
    fn company_news<'a>(
        &'a self,
        symbol: &'a str,
        window: DateRange,
    ) -> ServiceFuture<'a, Vec<RawArticle>>;

    /// General market news published within `window`, in provider order.
    fn general_news<'a>(&'a self, window: DateRange) -> ServiceFuture<'a, Vec<RawArticle>>;
}
