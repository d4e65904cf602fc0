// 3rd party crates
use thiserror::Error;

// Project imports
use crate::location::FieldMapError;

/// Session store failure. Logged by the caller, never fatal.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("could not connect to cache: {0}")]
    Connection(String),

    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("stored entry could not be decoded: {0}")]
    Decode(#[from] FieldMapError),
}
