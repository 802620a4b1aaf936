use serde_json::Value;

use crate::core::FhError;
use crate::news::model::RawArticle;

/// Decodes a news response body.
///
/// `null` is an empty list. Array elements that do not decode as an article
/// are skipped; a body that is not an array at all is an error.
pub(crate) fn parse_articles(body: &str) -> Result<Vec<RawArticle>, FhError> {
    let value: Value = serde_json::from_str(body)?;
    if value.is_null() {
        return Ok(Vec::new());
    }
    let items: Vec<Value> = serde_json::from_value(value)?;
    let total = items.len();
    let articles: Vec<RawArticle> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if articles.len() < total {
        tracing::debug!(
            skipped = total - articles.len(),
            "dropped undecodable news items"
        );
    }
    Ok(articles)
}
