// Standard library
use std::sync::Arc;

// 3rd party crates
use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio::time::{Duration, Instant};
use tracing::trace;

// Current module imports
use super::traits::RateLimiter;
use super::types::{RateLimitConfig, TokenBucketRateLimiter};

impl TokenBucketRateLimiter {
    /// Create a new token bucket rate limiter
    pub fn new(config: RateLimitConfig) -> Self {
        let capacity = config.max_requests as usize;
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
            window: Duration::from_secs(config.window_secs),
            last_refill: tokio::sync::Mutex::new(Instant::now()),
        }
    }

    /// Refill the token bucket if enough time has passed
    async fn try_refill(&self) {
        let mut last_refill = self.last_refill.lock().await;
        let now = Instant::now();
        let elapsed = now.duration_since(*last_refill);

        if elapsed >= self.window {
            let missing = self
                .capacity
                .saturating_sub(self.semaphore.available_permits());
            self.semaphore.add_permits(missing);
            *last_refill = now;
            trace!(refilled = missing, "Rate limit window reset");
        }
    }
}

#[async_trait]
impl RateLimiter for TokenBucketRateLimiter {
    async fn acquire(&self) -> bool {
        self.try_refill().await;
        match self.semaphore.try_acquire() {
            Ok(permit) => {
                // Spent tokens only come back on the next refill.
                permit.forget();
                true
            }
            Err(_) => false,
        }
    }

    fn remaining(&self) -> usize {
        self.semaphore.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn exhausts_then_refills_after_window() {
        let limiter = TokenBucketRateLimiter::new(RateLimitConfig {
            max_requests: 2,
            window_secs: 60,
        });

        assert!(limiter.acquire().await);
        assert!(limiter.acquire().await);
        assert!(!limiter.acquire().await);
        assert_eq!(limiter.remaining(), 0);

        tokio::time::advance(Duration::from_secs(61)).await;

        assert!(limiter.acquire().await);
        assert_eq!(limiter.remaining(), 1);
    }
}
