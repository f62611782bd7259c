//! Token bucket limiter shared by all outbound requests.

use std::num::NonZeroU32;
use std::sync::Arc;

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use tokio_util::sync::CancellationToken;

use crate::error::DmarketError;
use crate::rate_limit::RateLimitConfig;

type DirectLimiter = Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Token bucket rate limiter.
///
/// Cloning is cheap and every clone draws from the same bucket.
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Option<Arc<DirectLimiter>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Create a limiter from configuration.
    ///
    /// Fails with [`DmarketError::Configuration`] for a zero period or zero burst.
    pub fn new(config: RateLimitConfig) -> Result<Self, DmarketError> {
        if !config.enabled {
            return Ok(Self {
                limiter: None,
                config,
            });
        }

        let burst = NonZeroU32::new(config.burst).ok_or_else(|| {
            DmarketError::Configuration("rate limit burst must be greater than zero".to_string())
        })?;
        let quota = Quota::with_period(config.period)
            .ok_or_else(|| {
                DmarketError::Configuration(
                    "rate limit period must be greater than zero".to_string(),
                )
            })?
            .allow_burst(burst);

        Ok(Self {
            limiter: Some(Arc::new(Governor::direct(quota))),
            config,
        })
    }

    /// A limiter that lets every request through.
    pub fn unlimited() -> Self {
        Self {
            limiter: None,
            config: RateLimitConfig::disabled(),
        }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Wait for a token, or fail with [`DmarketError::RateLimit`] once `cancel` fires.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<(), DmarketError> {
        let Some(limiter) = &self.limiter else {
            return if cancel.is_cancelled() {
                Err(DmarketError::RateLimit)
            } else {
                Ok(())
            };
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(DmarketError::RateLimit),
            _ = limiter.until_ready() => Ok(()),
        }
    }

    /// Take a token if one is available right now.
    pub fn check(&self) -> bool {
        self.limiter
            .as_ref()
            .is_none_or(|limiter| limiter.check().is_ok())
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default()).unwrap_or_else(|_| Self::unlimited())
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_zero_burst_rejected() {
        let err = RateLimiter::new(RateLimitConfig::new(Duration::from_millis(10), 0)).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_zero_period_rejected() {
        let err = RateLimiter::new(RateLimitConfig::new(Duration::ZERO, 1)).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_burst_then_blocked() {
        let limiter = RateLimiter::new(RateLimitConfig::new(Duration::from_secs(60), 3)).unwrap();
        assert!(limiter.check());
        assert!(limiter.check());
        assert!(limiter.check());
        assert!(!limiter.check());
    }

    #[test]
    fn test_clones_share_bucket() {
        let limiter = RateLimiter::new(RateLimitConfig::new(Duration::from_secs(60), 1)).unwrap();
        let clone = limiter.clone();
        assert!(limiter.check());
        assert!(!clone.check());
    }

    #[test]
    fn test_unlimited_always_allows() {
        let limiter = RateLimiter::unlimited();
        for _ in 0..1000 {
            assert!(limiter.check());
        }
    }

    #[tokio::test]
    async fn test_acquire_waits_for_token() {
        let limiter =
            RateLimiter::new(RateLimitConfig::new(Duration::from_millis(50), 1)).unwrap();
        let cancel = CancellationToken::new();

        let start = Instant::now();
        limiter.acquire(&cancel).await.unwrap();
        limiter.acquire(&cancel).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn test_acquire_cancelled() {
        let limiter = RateLimiter::new(RateLimitConfig::new(Duration::from_secs(60), 1)).unwrap();
        let cancel = CancellationToken::new();
        limiter.acquire(&cancel).await.unwrap();

        let waiter = {
            let limiter = limiter.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move { limiter.acquire(&cancel).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        cancel.cancel();

        let result = waiter.await.unwrap();
        assert!(matches!(result, Err(DmarketError::RateLimit)));
    }

    #[tokio::test]
    async fn test_unlimited_respects_cancelled_token() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = RateLimiter::unlimited().acquire(&cancel).await;
        assert!(matches!(result, Err(DmarketError::RateLimit)));
    }
}
