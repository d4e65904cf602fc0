// Standard library
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

// 3rd party crates
use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, warn};

// Project imports
use crate::location::LocationEstimate;

// Current module imports
use super::constants::MAX_MEMORY_ENTRIES;
use super::functions::session_key;
use super::traits::SessionCache;

#[derive(Clone, Debug)]
struct CachedEstimate {
    estimate: LocationEstimate,
    stored_at: Instant,
}

/// In-process session store with the same TTL semantics as Redis.
pub struct MemorySessionCache {
    entries: RwLock<HashMap<String, CachedEstimate>>,
    ttl: Duration,
    max_entries: usize,
}

impl fmt::Debug for MemorySessionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySessionCache")
            .field("ttl", &self.ttl)
            .field("max_entries", &self.max_entries)
            .finish()
    }
}

impl MemorySessionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            max_entries: MAX_MEMORY_ENTRIES,
        }
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    fn evict_expired_and_oldest(&self, entries: &mut HashMap<String, CachedEstimate>) {
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);

        if entries.len() < self.max_entries {
            return;
        }

        let mut by_age: Vec<_> = entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.stored_at))
            .collect();
        by_age.sort_by_key(|(_, stored_at)| *stored_at);

        let excess = entries.len() + 1 - self.max_entries;
        for (key, _) in by_age.into_iter().take(excess) {
            entries.remove(&key);
        }
        warn!(evicted = excess, "Evicted oldest session cache entries");
    }
}

#[async_trait]
impl SessionCache for MemorySessionCache {
    async fn get(&self, session_id: &str) -> Option<LocationEstimate> {
        let entries = self.entries.read().await;
        entries
            .get(&session_key(session_id))
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.estimate.clone())
    }

    async fn put(&self, session_id: &str, estimate: &LocationEstimate) {
        let key = session_key(session_id);
        let mut entries = self.entries.write().await;
        if !entries.contains_key(&key) {
            self.evict_expired_and_oldest(&mut entries);
        }
        entries.insert(
            key,
            CachedEstimate {
                estimate: estimate.clone(),
                stored_at: Instant::now(),
            },
        );
        debug!(session = %session_id, "Cached location in memory");
    }

    fn get_name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> LocationEstimate {
        LocationEstimate {
            city: "Paris".to_string(),
            country: "France".to_string(),
            ..LocationEstimate::from_coordinates(48.8566, 2.3522)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn round_trip_then_expire() {
        let cache = MemorySessionCache::new(Duration::from_secs(3600));
        cache.put("session-1", &paris()).await;
        assert_eq!(cache.get("session-1").await, Some(paris()));
        assert_eq!(cache.get("session-2").await, None);

        tokio::time::advance(Duration::from_secs(3601)).await;
        assert_eq!(cache.get("session-1").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn put_refreshes_ttl() {
        let cache = MemorySessionCache::new(Duration::from_secs(100));
        cache.put("s", &paris()).await;

        tokio::time::advance(Duration::from_secs(80)).await;
        cache.put("s", &paris()).await;

        tokio::time::advance(Duration::from_secs(80)).await;
        assert!(cache.get("s").await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn evicts_oldest_when_full() {
        let cache = MemorySessionCache::new(Duration::from_secs(3600)).with_max_entries(2);
        cache.put("a", &paris()).await;
        tokio::time::advance(Duration::from_secs(1)).await;
        cache.put("b", &paris()).await;
        tokio::time::advance(Duration::from_secs(1)).await;
        cache.put("c", &paris()).await;

        assert_eq!(cache.len().await, 2);
        assert!(cache.get("a").await.is_none());
        assert!(cache.get("c").await.is_some());
    }
}
