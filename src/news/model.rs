use serde::{Deserialize, Serialize};

/// An article as returned by the provider. Nothing in it is guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawArticle {
    /// Provider id. Not unique across symbols.
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Publication time, Unix seconds.
    #[serde(default)]
    pub datetime: Option<i64>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub related: Option<String>,
}

/// A validated, display-ready news article.
///
/// Every field is populated; only `image` and `related` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedArticle {
    /// Provider id for general news; a stable id derived from symbol and
    /// provider id for company news.
    pub id: i64,
    /// The trimmed headline.
    pub headline: String,
    /// The trimmed summary, cut to the mode's length and suffixed with `...`.
    pub summary: String,
    /// Publisher name, or a generic label when the provider gave none.
    pub source: String,
    /// Link to the full article.
    pub url: String,
    /// Publication time, Unix seconds.
    pub datetime: i64,
    /// Thumbnail URL, possibly empty.
    pub image: String,
    /// `"company"` for watchlist news, otherwise the provider category (default `"general"`).
    pub category: String,
    /// The symbol the article was fetched for, or the provider's related tickers.
    pub related: String,
}
