use std::time::Duration;

use stockwatch::{Backoff, FhError, RetryConfig};

use crate::common::server_error;

fn not_found() -> FhError {
    FhError::NotFound {
        url: "https://finnhub.test/api/v1/news".to_string(),
    }
}

fn rate_limited() -> FhError {
    FhError::RateLimited {
        url: "https://finnhub.test/api/v1/news".to_string(),
    }
}

#[test]
fn default_policy_retries_transient_statuses() {
    let cfg = RetryConfig::default();
    assert!(cfg.should_retry(&server_error(503), 1));
    assert!(cfg.should_retry(&server_error(500), 2));
    assert!(cfg.should_retry(&rate_limited(), 1));
    assert!(!cfg.should_retry(&server_error(501), 1));
    assert!(!cfg.should_retry(&not_found(), 1));
    assert!(!cfg.should_retry(&FhError::InvalidParams("x".into()), 1));
}

#[test]
fn retries_stop_after_max_retries() {
    let cfg = RetryConfig {
        max_retries: 2,
        ..RetryConfig::default()
    };
    assert!(cfg.should_retry(&server_error(502), 2));
    assert!(!cfg.should_retry(&server_error(502), 3));
}

#[test]
fn wrapped_news_errors_are_classified_by_their_cause() {
    let cfg = RetryConfig::default();
    let transient = FhError::NewsUnavailable(Box::new(server_error(504)));
    let permanent = FhError::NewsUnavailable(Box::new(not_found()));
    assert!(cfg.should_retry(&transient, 1));
    assert!(!cfg.should_retry(&permanent, 1));
}

#[test]
fn disabled_policy_never_retries() {
    let cfg = RetryConfig::disabled();
    assert!(!cfg.enabled);
    assert!(!cfg.should_retry(&server_error(503), 1));
}

#[test]
fn status_list_is_configurable() {
    let cfg = RetryConfig {
        retry_on_status: vec![404],
        ..RetryConfig::default()
    };
    assert!(cfg.should_retry(&not_found(), 1));
    assert!(!cfg.should_retry(&server_error(503), 1));
}

#[test]
fn fixed_backoff_is_constant() {
    let b = Backoff::Fixed(Duration::from_millis(250));
    assert_eq!(b.delay(0), Duration::from_millis(250));
    assert_eq!(b.delay(7), Duration::from_millis(250));
}

#[test]
fn exponential_backoff_grows_and_is_capped() {
    let b = Backoff::Exponential {
        base: Duration::from_millis(100),
        factor: 2.0,
        max: Duration::from_millis(500),
        jitter: false,
    };
    assert_eq!(b.delay(0), Duration::from_millis(100));
    assert_eq!(b.delay(1), Duration::from_millis(200));
    assert_eq!(b.delay(2), Duration::from_millis(400));
    assert_eq!(b.delay(3), Duration::from_millis(500));
    assert_eq!(b.delay(30), Duration::from_millis(500));
}

#[test]
fn jittered_backoff_stays_within_bounds() {
    let b = Backoff::Exponential {
        base: Duration::from_millis(100),
        factor: 2.0,
        max: Duration::from_secs(1),
        jitter: true,
    };
    for _ in 0..50 {
        let d = b.delay(1);
        assert!(d >= Duration::from_millis(100) && d <= Duration::from_millis(300), "{d:?}");
    }
}
