// Standard library
use std::sync::Arc;

// 3rd party crates
use serde::Deserialize;
use tokio::sync::Semaphore;
use tokio::time::{Duration, Instant};

/// Request quota for one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum number of requests per time window
    pub max_requests: u32,
    /// Time window in seconds
    pub window_secs: u64,
}

/// A token bucket that refills completely once per window.
pub struct TokenBucketRateLimiter {
    pub semaphore: Arc<Semaphore>,
    pub capacity: usize,
    pub window: Duration,
    pub last_refill: tokio::sync::Mutex<Instant>,
}
