// 3rd party crates
use async_trait::async_trait;

// Project imports
use crate::location::LocationEstimate;

// Current module imports
use super::traits::SessionCache;

/// Always misses; writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSessionCache;

#[async_trait]
impl SessionCache for NullSessionCache {
    async fn get(&self, _session_id: &str) -> Option<LocationEstimate> {
        None
    }

    async fn put(&self, _session_id: &str, _estimate: &LocationEstimate) {}

    fn get_name(&self) -> &str {
        "null"
    }
}
