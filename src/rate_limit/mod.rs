//! Client-side rate limiting for DMarket API.
//!
//! DMarket throttles requests per API key. Every outbound request waits for a
//! token from a [`RateLimiter`] before it is signed and sent.
//!
//! The limiter is an explicit value: clone it (clones share one bucket) and
//! hand it to every client that should be paced together.
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use dmarket_api_client::rate_limit::{RateLimitConfig, RateLimiter};
//!
//! // Eight requests per second with a burst of eight
//! let limiter = RateLimiter::new(RateLimitConfig::default()).unwrap();
//! assert!(limiter.check());
//!
//! // A slower bucket shared by two clients
//! let shared = RateLimiter::new(RateLimitConfig::new(Duration::from_millis(500), 2)).unwrap();
//! let for_second_client = shared.clone();
//! # let _ = for_second_client;
//! ```

mod limiter;

pub use limiter::RateLimiter;

use std::time::Duration;

/// Rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Time to replenish one token.
    pub period: Duration,
    /// Maximum number of tokens that can be spent at once.
    pub burst: u32,
    /// Whether to enable rate limiting.
    pub enabled: bool,
}

impl RateLimitConfig {
    /// Create an enabled config with the given replenish period and burst.
    pub fn new(period: Duration, burst: u32) -> Self {
        Self {
            period,
            burst,
            enabled: true,
        }
    }

    /// A config that never delays requests.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(limits::DEFAULT_PERIOD_MS),
            limits::DEFAULT_BURST,
        )
    }
}

/// Default rate limit constants.
pub mod limits {
    /// One token every 125 ms.
    pub const DEFAULT_PERIOD_MS: u64 = 125;
    /// Up to eight requests back to back.
    pub const DEFAULT_BURST: u32 = 8;
}
