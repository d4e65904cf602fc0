pub mod impls;
pub mod traits;
pub mod types;

pub use traits::RateLimiter;
pub use types::{RateLimitConfig, TokenBucketRateLimiter};
