//! Per-session location cache.
//!
//! The backend is chosen once by [`connect`]: Redis when reachable, an
//! in-process map when configured, or a null store that always misses.

pub mod constants;
pub mod errors;
pub mod functions;
pub mod memory;
pub mod null;
pub mod redis;
pub mod traits;

pub use errors::CacheError;
pub use functions::{connect, session_key};
pub use memory::MemorySessionCache;
pub use null::NullSessionCache;
pub use self::redis::RedisSessionCache;
pub use traits::SessionCache;
