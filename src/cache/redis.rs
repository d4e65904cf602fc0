// Standard library
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

// 3rd party crates
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::{debug, warn};

// Project imports
use crate::location::LocationEstimate;

// Current module imports
use super::errors::CacheError;
use super::functions::session_key;
use super::traits::SessionCache;

/// Session store backed by a Redis hash per session.
///
/// Writes replace the whole hash and reset its expiry in one `MULTI`
/// transaction, so readers never observe a half-written entry.
#[derive(Clone)]
pub struct RedisSessionCache {
    connection: ConnectionManager,
    ttl: Duration,
}

impl fmt::Debug for RedisSessionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisSessionCache")
            .field("connection", &"<ConnectionManager>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl RedisSessionCache {
    /// Opens a managed connection and checks it with `PING`.
    pub async fn connect(
        url: &str,
        ttl: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, CacheError> {
        let client = redis::Client::open(url)?;

        let mut connection = tokio::time::timeout(connect_timeout, client.get_connection_manager())
            .await
            .map_err(|_| {
                CacheError::Connection(format!(
                    "no connection within {} seconds",
                    connect_timeout.as_secs()
                ))
            })??;

        let pong: String = tokio::time::timeout(
            connect_timeout,
            redis::cmd("PING").query_async(&mut connection),
        )
        .await
        .map_err(|_| CacheError::Connection("PING timed out".to_string()))??;
        debug!(reply = %pong, "Redis answered PING");

        Ok(Self { connection, ttl })
    }

    pub async fn try_get(&self, session_id: &str) -> Result<Option<LocationEstimate>, CacheError> {
        let mut connection = self.connection.clone();
        let fields: HashMap<String, String> = connection.hgetall(session_key(session_id)).await?;
        if fields.is_empty() {
            return Ok(None);
        }
        Ok(Some(LocationEstimate::from_field_map(&fields)?))
    }

    pub async fn try_put(
        &self,
        session_id: &str,
        estimate: &LocationEstimate,
    ) -> Result<(), CacheError> {
        let key = session_key(session_id);
        let fields = estimate.to_field_map();
        let ttl_secs = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);

        let mut connection = self.connection.clone();
        let _: () = redis::pipe()
            .atomic()
            .del(&key)
            .ignore()
            .hset_multiple(&key, fields.as_slice())
            .ignore()
            .expire(&key, ttl_secs)
            .ignore()
            .query_async(&mut connection)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl SessionCache for RedisSessionCache {
    async fn get(&self, session_id: &str) -> Option<LocationEstimate> {
        match self.try_get(session_id).await {
            Ok(hit) => {
                debug!(session = %session_id, hit = hit.is_some(), "Session cache lookup");
                hit
            }
            Err(e) => {
                warn!(session = %session_id, error = %e, "Session cache read failed");
                None
            }
        }
    }

    async fn put(&self, session_id: &str, estimate: &LocationEstimate) {
        if let Err(e) = self.try_put(session_id, estimate).await {
            warn!(session = %session_id, error = %e, "Session cache write failed");
        }
    }

    fn get_name(&self) -> &str {
        "redis"
    }
}
