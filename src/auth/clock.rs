//! Time source for request signing.
//!
//! DMarket checks `X-Sign-Date` against its own clock, so the signer reads
//! the current unix time once per request through a [`Clock`].

use std::sync::atomic::{AtomicI64, Ordering};

use time::OffsetDateTime;

/// Trait for providing the unix timestamp used in request signatures.
pub trait Clock: Send + Sync {
    /// Current unix time in whole seconds.
    fn unix_timestamp(&self) -> i64;
}

/// Wall-clock time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_timestamp(&self) -> i64 {
        OffsetDateTime::now_utc().unix_timestamp()
    }
}

/// A clock that returns a settable timestamp.
///
/// Useful for reproducing signatures in tests.
#[derive(Debug)]
pub struct FixedClock {
    timestamp: AtomicI64,
}

impl FixedClock {
    /// Create a clock stopped at `timestamp`.
    pub fn new(timestamp: i64) -> Self {
        Self {
            timestamp: AtomicI64::new(timestamp),
        }
    }

    /// Move the clock to `timestamp`.
    pub fn set(&self, timestamp: i64) {
        self.timestamp.store(timestamp, Ordering::SeqCst);
    }

    /// Move the clock forward by `seconds`.
    pub fn advance(&self, seconds: i64) {
        self.timestamp.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn unix_timestamp(&self) -> i64 {
        self.timestamp.load(Ordering::SeqCst)
    }
}
