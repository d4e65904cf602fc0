pub const SESSION_KEY_PREFIX: &str = "location:";

/// One hour.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 2;

/// Oldest entries are evicted past this size.
pub const MAX_MEMORY_ENTRIES: usize = 10_000;
