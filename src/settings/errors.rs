// 3rd party crates
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid log level: {0}. Must be one of: error, warn, info, debug, trace")]
    InvalidLogLevel(String),
    #[error("Weight for provider {provider} must be a finite number in [0, 1], got {weight}")]
    InvalidProviderWeight { provider: String, weight: f64 },
    #[error("Timeout for provider {0} must be greater than 0")]
    InvalidProviderTimeout(String),
    #[error("Rate limit for provider {0} must allow at least one request per non-empty window")]
    InvalidRateLimit(String),
    #[error("Cache TTL must be greater than 0, got {0}")]
    InvalidCacheTtl(u64),
    #[error("IP accuracy ceiling must be in (0, 1], got {0}")]
    InvalidAccuracyCeiling(f64),
    #[error("Resolution deadline must be greater than 0, got {0}")]
    InvalidDeadline(u64),
    #[error("Outlier radius must be a positive number of kilometres, got {0}")]
    InvalidOutlierRadius(f64),
}
