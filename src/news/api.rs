use std::collections::HashSet;

use crate::core::{
    CacheMode, DateRange, FhClient, FhError, NewsService, ServiceFuture, net,
};
use crate::news::model::{FormattedArticle, RawArticle};
use crate::news::wire;

/// Upper bound on returned articles and on company-news calls per request.
pub const MAX_ARTICLES: usize = 6;
/// Calendar days covered by every news query.
pub const LOOKBACK_DAYS: u64 = 5;

const COMPANY_SUMMARY_LEN: usize = 200;
const GENERAL_SUMMARY_LEN: usize = 150;
const COMPANY_SOURCE: &str = "Company News";
const GENERAL_SOURCE: &str = "Market News";

/* ---------------- Provider calls ---------------- */

impl NewsService for FhClient {
    fn company_news<'a>(
        &'a self,
        symbol: &'a str,
        window: DateRange,
    ) -> ServiceFuture<'a, Vec<RawArticle>> {
        Box::pin(async move {
            let (from, to) = (window.from_param(), window.to_param());
            let url = self.endpoint(
                "company-news",
                &[("symbol", symbol), ("from", from.as_str()), ("to", to.as_str())],
            )?;
            let body = net::get_text(self, &url, None, CacheMode::Bypass).await?;
            wire::parse_articles(&body)
        })
    }

    fn general_news<'a>(&'a self, window: DateRange) -> ServiceFuture<'a, Vec<RawArticle>> {
        Box::pin(async move {
            let (from, to) = (window.from_param(), window.to_param());
            let url = self.endpoint(
                "news",
                &[("category", "general"), ("from", from.as_str()), ("to", to.as_str())],
            )?;
            let body = net::get_text(self, &url, None, CacheMode::Bypass).await?;
            wire::parse_articles(&body)
        })
    }
}

/* ---------------- Aggregation ---------------- */

/// Trims and uppercases symbols, dropping empty ones. Order and repeats are kept.
pub fn normalize_symbols<S: AsRef<str>>(symbols: &[S]) -> Vec<String> {
    symbols
        .iter()
        .map(|s| s.as_ref().trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn non_blank(s: Option<&String>) -> Option<&str> {
    s.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// An article is usable when headline, summary and url are non-blank and it
/// carries a non-zero timestamp.
pub(crate) fn is_valid(article: &RawArticle) -> bool {
    non_blank(article.headline.as_ref()).is_some()
        && non_blank(article.summary.as_ref()).is_some()
        && non_blank(article.url.as_ref()).is_some()
        && article.datetime.is_some_and(|t| t != 0)
}

/// Trimmed text cut to `max` characters, always followed by `...`.
pub(crate) fn truncate_summary(text: &str, max: usize) -> String {
    let mut out: String = text.trim().chars().take(max).collect();
    out.push_str("...");
    out
}

/// Deterministic id for a company article: FNV-1a over the symbol and the
/// provider id, kept within 53 bits so it survives a JSON number round trip.
pub(crate) fn stable_article_id(symbol: &str, upstream_id: i64) -> i64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    let mut hash = OFFSET;
    for byte in symbol
        .bytes()
        .chain(std::iter::once(b':'))
        .chain(upstream_id.to_le_bytes())
    {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(PRIME);
    }
    // masked to 53 bits, always fits
    i64::try_from(hash & ((1 << 53) - 1)).unwrap_or_default()
}

fn text_or(value: Option<&String>, default: &str) -> String {
    non_blank(value).unwrap_or(default).to_string()
}

// Callers must have checked `is_valid`.
fn company_article(raw: &RawArticle, symbol: &str) -> FormattedArticle {
    FormattedArticle {
        id: stable_article_id(symbol, raw.id),
        headline: text_or(raw.headline.as_ref(), ""),
        summary: truncate_summary(raw.summary.as_deref().unwrap_or_default(), COMPANY_SUMMARY_LEN),
        source: text_or(raw.source.as_ref(), COMPANY_SOURCE),
        url: text_or(raw.url.as_ref(), ""),
        datetime: raw.datetime.unwrap_or_default(),
        image: raw.image.clone().unwrap_or_default(),
        category: "company".to_string(),
        related: symbol.to_string(),
    }
}

fn general_article(raw: &RawArticle) -> FormattedArticle {
    FormattedArticle {
        id: raw.id,
        headline: text_or(raw.headline.as_ref(), ""),
        summary: truncate_summary(raw.summary.as_deref().unwrap_or_default(), GENERAL_SUMMARY_LEN),
        source: text_or(raw.source.as_ref(), GENERAL_SOURCE),
        url: text_or(raw.url.as_ref(), ""),
        datetime: raw.datetime.unwrap_or_default(),
        image: raw.image.clone().unwrap_or_default(),
        category: text_or(raw.category.as_ref(), "general"),
        related: raw.related.clone().unwrap_or_default(),
    }
}

fn dedupe_key(raw: &RawArticle) -> String {
    format!(
        "{}-{}-{}",
        raw.id,
        raw.url.as_deref().unwrap_or_default(),
        raw.headline.as_deref().unwrap_or_default()
    )
}

pub(crate) async fn aggregate<S, T>(
    service: &S,
    symbols: Option<&[T]>,
    window: DateRange,
) -> Result<Vec<FormattedArticle>, FhError>
where
    S: NewsService + ?Sized,
    T: AsRef<str>,
{
    let clean = symbols.map(normalize_symbols).unwrap_or_default();
    if clean.is_empty() {
        return general_news(service, window).await;
    }
    Ok(personalized_news(service, &clean, window).await)
}

/// First valid company article for `symbol`, formatted.
async fn company_round<S: NewsService + ?Sized>(
    service: &S,
    symbol: &str,
    window: DateRange,
) -> Result<Option<FormattedArticle>, FhError> {
    let raw = service.company_news(symbol, window).await?;
    Ok(raw
        .iter()
        .find(|a| is_valid(a))
        .map(|a| company_article(a, symbol)))
}

/// Round-robin over `symbols`, at most one article per call and
/// [`MAX_ARTICLES`] calls in total. Failed rounds are logged and skipped.
/// Empty output is a valid result and does not fall back to general news.
async fn personalized_news<S: NewsService + ?Sized>(
    service: &S,
    symbols: &[String],
    window: DateRange,
) -> Vec<FormattedArticle> {
    let mut articles = Vec::with_capacity(MAX_ARTICLES);
    let mut round = 0;

    while articles.len() < MAX_ARTICLES && round < MAX_ARTICLES {
        let symbol = &symbols[round % symbols.len()];
        match company_round(service, symbol, window).await {
            Ok(Some(article)) => articles.push(article),
            Ok(None) => tracing::debug!(%symbol, round, "no valid company article"),
            Err(e) => tracing::warn!(%symbol, round, error = %e, "company news round failed"),
        }
        round += 1;
    }

    // stable: equal timestamps keep round order
    articles.sort_by(|a, b| b.datetime.cmp(&a.datetime));
    articles
}

/// One general-news call, validated, deduplicated and cut to
/// [`MAX_ARTICLES`] in provider order. A failed call is fatal.
async fn general_news<S: NewsService + ?Sized>(
    service: &S,
    window: DateRange,
) -> Result<Vec<FormattedArticle>, FhError> {
    let raw = service
        .general_news(window)
        .await
        .map_err(|e| FhError::NewsUnavailable(Box::new(e)))?;

    let mut seen = HashSet::new();
    Ok(raw
        .iter()
        .filter(|a| is_valid(a))
        .filter(|a| seen.insert(dedupe_key(a)))
        .take(MAX_ARTICLES)
        .map(general_article)
        .collect())
}
