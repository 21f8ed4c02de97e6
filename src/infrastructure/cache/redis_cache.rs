//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use crate::domain::entities::PostBundle;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Redis cache for post bundles, stored as JSON under `bundle:<id>`.
///
/// All operations are fail-open: errors are logged but don't propagate to callers.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// `default_ttl_seconds` applies when [`CacheService::set_bundle`] gets no TTL;
    /// it comes from `CACHE_TTL_SECONDS`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
            key_prefix: "bundle:".to_string(),
        })
    }

    fn build_key(&self, post_id: i64) -> String {
        format!("{}{}", self.key_prefix, post_id)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_bundle(&self, post_id: i64) -> CacheResult<Option<PostBundle>> {
        let key = self.build_key(post_id);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<PostBundle>(&raw) {
                Ok(bundle) => {
                    debug!("Cache HIT: {}", key);
                    Ok(Some(bundle))
                }
                Err(e) => {
                    warn!("Dropping undecodable cache entry {}: {}", key, e);
                    let _ = conn.del::<_, i32>(&key).await;
                    Ok(None)
                }
            },
            Ok(None) => {
                debug!("Cache MISS: {}", key);
                Ok(None)
            }
            Err(e) => {
                error!("Redis GET error for {}: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn set_bundle(&self, bundle: &PostBundle, ttl_seconds: Option<u64>) -> CacheResult<()> {
        let key = self.build_key(bundle.post.id);
        let payload = serde_json::to_string(bundle)
            .map_err(|e| CacheError::OperationError(format!("Failed to encode bundle: {}", e)))?;
        let ttl_seconds = ttl_seconds.unwrap_or(self.default_ttl);
        let mut conn = self.client.clone();

        match conn.set_ex::<_, _, ()>(&key, payload, ttl_seconds).await {
            Ok(_) => {
                debug!("Cache SET: {} (TTL: {}s)", key, ttl_seconds);
                Ok(())
            }
            Err(e) => {
                warn!("Redis SET error for {}: {}", key, e);
                Ok(())
            }
        }
    }

    async fn invalidate(&self, post_id: i64) -> CacheResult<()> {
        let key = self.build_key(post_id);
        let mut conn = self.client.clone();

        match conn.del::<_, i32>(&key).await {
            Ok(deleted) => {
                if deleted > 0 {
                    debug!("Cache INVALIDATE: {}", key);
                }
                Ok(())
            }
            Err(e) => {
                warn!("Redis DEL error for {}: {}", key, e);
                Err(CacheError::OperationError(format!("DEL {}: {}", key, e)))
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
