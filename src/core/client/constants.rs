//! Centralized constants for default endpoints, UA and timeouts.

use std::time::Duration;

/// UA sent with every request.
pub(crate) const USER_AGENT: &str = concat!("stockwatch-rs/", env!("CARGO_PKG_VERSION"));

/// Finnhub REST API base (endpoint paths are joined onto it, so it must end with `/`).
pub(crate) const DEFAULT_BASE_URL: &str = "https://finnhub.io/api/v1/";

/// Environment variable holding the Finnhub API token.
pub(crate) const ENV_API_KEY: &str = "FINNHUB_API_KEY";

/// Optional environment override for the API base.
pub(crate) const ENV_BASE_URL: &str = "FINNHUB_BASE_URL";

/// Overall per-request timeout unless the builder overrides it.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// TTL used by `cache_put` when the caller does not pass one.
pub(crate) const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);
