//! Per-user news collection for the scheduled daily summary email.
//!
//! The scheduler calls [`DailyDigest::collect`] once a day with every
//! subscribed user. Each user is handled independently: a failing watchlist
//! lookup degrades to general news, and a failing news step is retried per
//! the [`RetryConfig`] and then degrades to an empty list. Composing and
//! sending the email is left to the caller.

use chrono::NaiveDate;
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::core::{FhError, NewsService, RetryConfig};
use crate::news::{FormattedArticle, NewsBuilder};
use crate::watchlist::WatchlistStore;

/// A digest recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
}

/// The articles collected for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserNews {
    pub user: User,
    pub articles: Vec<FormattedArticle>,
}

/// Collects daily news for a batch of users.
pub struct DailyDigest<'a, N: NewsService + ?Sized, W: WatchlistStore + ?Sized> {
    news: &'a N,
    store: &'a W,
    retry: RetryConfig,
    as_of: Option<NaiveDate>,
}

impl<'a, N: NewsService + ?Sized, W: WatchlistStore + ?Sized> DailyDigest<'a, N, W> {
    /// Creates a digest that reads watchlists from `store` and news from `news`.
    pub fn new(news: &'a N, store: &'a W) -> Self {
        Self {
            news,
            store,
            retry: RetryConfig::default(),
            as_of: None,
        }
    }

    /// Overrides the retry policy of the per-user news step.
    #[must_use]
    pub fn retry_policy(mut self, cfg: RetryConfig) -> Self {
        self.retry = cfg;
        self
    }

    /// Pins "today" for every news window.
    #[must_use]
    pub const fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Collects news for every user concurrently. The output has one entry
    /// per user, in input order.
    #[tracing::instrument(skip_all, fields(users = users.len()))]
    pub async fn collect(&self, users: &[User]) -> Vec<UserNews> {
        join_all(users.iter().map(|user| self.for_user(user))).await
    }

    async fn for_user(&self, user: &User) -> UserNews {
        let symbols = match self.store.symbols_by_email(&user.email).await {
            Ok(symbols) => symbols,
            Err(e) => {
                tracing::warn!(email = %user.email, error = %e, "watchlist lookup failed");
                Vec::new()
            }
        };

        let articles = match self.news_step(&symbols).await {
            Ok(articles) => articles,
            Err(e) => {
                tracing::warn!(email = %user.email, error = %e, "news step failed");
                Vec::new()
            }
        };

        UserNews {
            user: user.clone(),
            articles,
        }
    }

    async fn news_step(&self, symbols: &[String]) -> Result<Vec<FormattedArticle>, FhError> {
        let mut attempt = 0;
        loop {
            let mut req = NewsBuilder::new(self.news).symbols(symbols.iter().cloned());
            if let Some(today) = self.as_of {
                req = req.as_of(today);
            }
            match req.fetch().await {
                Ok(articles) => return Ok(articles),
                Err(e) => {
                    attempt += 1;
                    if !self.retry.should_retry(&e, attempt) {
                        return Err(e);
                    }
                    let delay = self.retry.backoff.delay(attempt - 1);
                    tracing::debug!(attempt, ?delay, error = %e, "retrying news step");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
