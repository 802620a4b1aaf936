//! Core components of the `stockwatch` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`FhClient`] and its builder.
//! - The primary [`FhError`] type.
//! - The pluggable response cache.
//! - Date windows and internal networking.

/// Pluggable response cache (`ResponseCache`) and its in-memory default.
pub mod cache;
/// The main client (`FhClient`), builder, and configuration.
pub mod client;
/// Calendar-day windows for provider queries.
pub mod dates;
/// The primary error type (`FhError`) for the crate.
pub mod error;
/// Service traits that decouple the news engine from the HTTP client.
pub mod services;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::FhClient`
pub use cache::{MemoryCache, ResponseCache};
pub use client::{Backoff, CacheMode, FhClient, FhClientBuilder, RetryConfig};
pub use dates::DateRange;
pub use error::FhError;
pub use services::{NewsService, ServiceFuture};
