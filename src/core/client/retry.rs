use std::time::Duration;

use rand::Rng;

use crate::core::FhError;

/// Specifies the backoff strategy between retried steps.
#[derive(Clone, Debug)]
pub enum Backoff {
    /// Uses a fixed delay between retries.
    Fixed(Duration),
    /// Uses an exponential delay between retries.
    /// The delay is calculated as `base * (factor ^ attempt)`.
    Exponential {
        /// The initial backoff duration.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between retries.
        max: Duration,
        /// Whether to apply random jitter (+/- 50%) to the delay.
        jitter: bool,
    },
}

impl Backoff {
    /// Delay before retry number `attempt` (0-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        match self {
            Self::Fixed(d) => *d,
            Self::Exponential {
                base,
                factor,
                max,
                jitter,
            } => {
                let exp = i32::try_from(attempt).unwrap_or(i32::MAX);
                let raw = base.as_secs_f64() * factor.powi(exp);
                let mut secs = raw.min(max.as_secs_f64());
                if *jitter {
                    secs *= rand::rng().random_range(0.5..=1.5);
                }
                Duration::from_secs_f64(secs.clamp(0.0, max.as_secs_f64()))
            }
        }
    }
}

/// Retry policy for scheduled steps (see [`crate::digest`]).
///
/// Single HTTP calls are never retried by the client; a failed call is
/// reported to its caller, and the orchestration layer decides whether the
/// whole step runs again.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Enables or disables the retry mechanism.
    pub enabled: bool,
    /// The maximum number of retries to attempt. The total number of attempts will be `max_retries + 1`.
    pub max_retries: u32,
    /// The backoff strategy to use between retries.
    pub backoff: Backoff,
    /// HTTP status codes that should trigger a retry.
    pub retry_on_status: Vec<u16>,
    /// Whether to retry on request timeouts.
    pub retry_on_timeout: bool,
    /// Whether to retry on connection errors.
    pub retry_on_connect: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: 2,
            backoff: Backoff::Exponential {
                base: Duration::from_millis(200),
                factor: 2.0,
                max: Duration::from_secs(3),
                jitter: true,
            },
            retry_on_status: vec![408, 429, 500, 502, 503, 504],
            retry_on_timeout: true,
            retry_on_connect: true,
        }
    }
}

impl RetryConfig {
    /// A policy that runs every step exactly once.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Whether `err` should cause another attempt after `attempt` failed attempts.
    pub fn should_retry(&self, err: &FhError, attempt: u32) -> bool {
        if !self.enabled || attempt > self.max_retries {
            return false;
        }
        self.retryable(err)
    }

    fn retryable(&self, err: &FhError) -> bool {
        match err {
            FhError::NewsUnavailable(inner) => self.retryable(inner),
            FhError::RateLimited { .. } => self.retry_on_status.contains(&429),
            FhError::NotFound { .. } => self.retry_on_status.contains(&404),
            FhError::ServerError { status, .. } | FhError::Status { status, .. } => {
                self.retry_on_status.contains(status)
            }
            FhError::Http(e) => {
                (self.retry_on_timeout && e.is_timeout()) || (self.retry_on_connect && e.is_connect())
            }
            _ => false,
        }
    }
}

/// Defines the behavior of the response cache for a cacheable API call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Read from the cache if a non-expired entry is present; otherwise, fetch from the network
    /// and write the response to the cache. (Default)
    #[default]
    Use,
    /// Always fetch from the network, bypassing any cached entry, and write the new response to the cache.
    Refresh,
    /// Always fetch from the network and do not read from or write to the cache.
    Bypass,
}
