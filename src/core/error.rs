use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum FhError {
    /// An error occurred during an HTTP request (connection failure, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The response body was not the JSON shape we expected.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error, with the API token redacted.
        url: String,
    },

    /// The requested resource does not exist (HTTP 404).
    #[error("Not found at {url}")]
    NotFound {
        /// The URL that returned 404, with the API token redacted.
        url: String,
    },

    /// The provider rejected the call because the rate limit was exceeded (HTTP 429).
    #[error("Rate limited at {url}")]
    RateLimited {
        /// The URL that returned 429, with the API token redacted.
        url: String,
    },

    /// The provider failed with a 5xx status.
    #[error("Server error {status} at {url}")]
    ServerError {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error, with the API token redacted.
        url: String,
    },

    /// The client could not be configured (e.g. the API key is missing).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The caller supplied parameters the operation cannot work with.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// The watchlist store failed.
    #[error("Watchlist store error: {0}")]
    Store(String),

    /// General market news could not be fetched.
    #[error("failed to fetch news: {0}")]
    NewsUnavailable(#[source] Box<FhError>),
}

impl FhError {
    /// Classifies a non-success HTTP status.
    pub(crate) fn from_status(status: u16, url: String) -> Self {
        match status {
            404 => Self::NotFound { url },
            429 => Self::RateLimited { url },
            500..=599 => Self::ServerError { status, url },
            _ => Self::Status { status, url },
        }
    }
}
