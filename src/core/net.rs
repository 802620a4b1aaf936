use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::core::{CacheMode, FhClient, FhError};

/// Renders `url` with the `token` query value masked, for errors and logs.
pub(crate) fn redact(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == "token") {
        return url.to_string();
    }
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "token" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

/// Performs one GET and returns the body text.
///
/// With `cache_ttl` set the body may come from, and is written to, the
/// client's response cache according to `mode`. Without it the cache is
/// neither read nor written. Non-2xx statuses become errors; nothing is
/// retried here.
pub(crate) async fn get_text(
    client: &FhClient,
    url: &Url,
    cache_ttl: Option<Duration>,
    mode: CacheMode,
) -> Result<String, FhError> {
    let cacheable = cache_ttl.is_some() && mode != CacheMode::Bypass;

    if cacheable
        && mode == CacheMode::Use
        && let Some(body) = client.cache_get(url).await
    {
        tracing::trace!(url = %redact(url), "response served from cache");
        return Ok(body);
    }

    let resp = client
        .http()
        .get(url.clone())
        .header("accept", "application/json")
        .send()
        .await
        .map_err(|e| FhError::Http(e.without_url()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FhError::from_status(status.as_u16(), redact(url)));
    }

    let body = resp
        .text()
        .await
        .map_err(|e| FhError::Http(e.without_url()))?;

    if cacheable {
        client.cache_put(url, &body, cache_ttl).await;
    }
    Ok(body)
}

/// [`get_text`] followed by JSON decoding into `T`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &FhClient,
    url: &Url,
    cache_ttl: Option<Duration>,
    mode: CacheMode,
) -> Result<T, FhError> {
    let body = get_text(client, url, cache_ttl, mode).await?;
    Ok(serde_json::from_str(&body)?)
}
