// 3rd party crates
use async_trait::async_trait;

// Project imports
use crate::location::LocationEstimate;

/// Per-session store for resolved locations.
///
/// Implementations swallow their own errors: a failed read is a miss and a
/// failed write is dropped, both logged. Every `put` restarts the entry's
/// time-to-live.
#[async_trait]
pub trait SessionCache: Send + Sync {
    async fn get(&self, session_id: &str) -> Option<LocationEstimate>;

    async fn put(&self, session_id: &str, estimate: &LocationEstimate);

    /// Backend name for logs.
    fn get_name(&self) -> &str;
}
