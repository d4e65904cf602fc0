// Standard library
use std::sync::Arc;
use std::time::Duration;

// 3rd party crates
use tracing::{info, warn};

// Project imports
use crate::settings::types::{Cache, CacheBackend};

// Current module imports
use super::memory::MemorySessionCache;
use super::null::NullSessionCache;
use super::redis::RedisSessionCache;
use super::traits::SessionCache;

pub fn session_key(session_id: &str) -> String {
    format!("{}{}", super::constants::SESSION_KEY_PREFIX, session_id)
}

/// Picks the session store once at startup.
///
/// Redis is used only when a URL is configured and answers `PING` within the
/// connect timeout; otherwise caching is disabled.
pub async fn connect(settings: &Cache) -> Arc<dyn SessionCache> {
    let ttl = Duration::from_secs(settings.ttl);
    match settings.backend {
        CacheBackend::None => {
            info!("Session cache disabled");
            Arc::new(NullSessionCache)
        }
        CacheBackend::Memory => {
            info!(ttl_secs = settings.ttl, "Using in-process session cache");
            Arc::new(MemorySessionCache::new(ttl))
        }
        CacheBackend::Redis => {
            let Some(url) = settings.redis_url() else {
                info!("No Redis URL configured, session cache disabled");
                return Arc::new(NullSessionCache);
            };
            let timeout = Duration::from_secs(settings.connect_timeout_secs);
            match RedisSessionCache::connect(url, ttl, timeout).await {
                Ok(cache) => {
                    info!(ttl_secs = settings.ttl, "Connected to Redis session cache");
                    Arc::new(cache)
                }
                Err(e) => {
                    warn!(error = %e, "Redis unavailable, session cache disabled");
                    Arc::new(NullSessionCache)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationEstimate;

    #[test]
    fn key_layout() {
        assert_eq!(session_key("abc-123"), "location:abc-123");
    }

    #[tokio::test]
    async fn unreachable_redis_falls_back_to_null() {
        let settings = Cache {
            backend: CacheBackend::Redis,
            redis_url: Some("redis://127.0.0.1:1/".to_string()),
            ttl: 3600,
            connect_timeout_secs: 1,
        };
        let cache = connect(&settings).await;
        assert_eq!(cache.get_name(), "null");

        cache.put("s", &LocationEstimate::from_coordinates(1.0, 2.0)).await;
        assert!(cache.get("s").await.is_none());
    }

    #[tokio::test]
    async fn memory_backend_is_selectable() {
        let settings = Cache {
            backend: CacheBackend::Memory,
            ..Default::default()
        };
        assert_eq!(connect(&settings).await.get_name(), "memory");
    }
}
