//! Redis-based cache implementation.

use super::{with_timeout, CacheInterface};
use async_trait::async_trait;
use deadpool_redis::{Config, Connection, Pool, Runtime};
use recall_config::RedisConfig;
use recall_core::{RecallError, RecallResult};
use redis::AsyncCommands;
use shaku::Component;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Default TTL for cached hashes (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default deadline for a single cache round trip.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Redis-based cache service.
#[derive(Component)]
#[shaku(interface = CacheInterface)]
pub struct RedisCacheService {
    /// Redis connection pool. `None` disables the cache.
    pool: Option<Arc<Pool>>,
    /// Deadline applied to every command, including connection checkout.
    #[shaku(default = DEFAULT_OPERATION_TIMEOUT)]
    operation_timeout: Duration,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self::with_timeout(pool, DEFAULT_OPERATION_TIMEOUT)
    }

    /// Create a cache service with a custom operation timeout.
    #[must_use]
    pub fn with_timeout(pool: Arc<Pool>, operation_timeout: Duration) -> Self {
        Self {
            pool: Some(pool),
            operation_timeout,
        }
    }

    /// Create a no-op cache service (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            pool: None,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    async fn get_conn(&self) -> RecallResult<Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                RecallError::Cache(format!("Failed to get Redis connection: {e}"))
            }),
            None => Err(RecallError::Cache("Cache is disabled".to_string())),
        }
    }
}

fn ttl_secs(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_secs().max(1)).unwrap_or(i64::MAX)
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn hset_with_expiry(
        &self,
        key: &str,
        entries: &[(String, String)],
        ttl: Duration,
    ) -> RecallResult<()> {
        if !self.is_enabled() || entries.is_empty() {
            return Ok(());
        }

        with_timeout(self.operation_timeout, "hset", async {
            let mut conn = self.get_conn().await?;
            let _: () = redis::pipe()
                .atomic()
                .hset_multiple(key, entries)
                .ignore()
                .expire(key, ttl_secs(ttl))
                .ignore()
                .query_async(&mut *conn)
                .await
                .map_err(|e| RecallError::Cache(format!("Failed to write hash '{key}': {e}")))?;

            debug!(key, fields = entries.len(), ttl_secs = ttl.as_secs(), "Cached hash fields");
            Ok(())
        })
        .await
    }

    async fn hget(&self, key: &str, field: &str) -> RecallResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        with_timeout(self.operation_timeout, "hget", async {
            let mut conn = self.get_conn().await?;
            let value: Option<String> = conn.hget(key, field).await.map_err(|e| {
                RecallError::Cache(format!("Failed to read field '{key}/{field}': {e}"))
            })?;

            match &value {
                Some(_) => debug!(key, field, "Cache hit"),
                None => debug!(key, field, "Cache miss"),
            }
            Ok(value)
        })
        .await
    }

    async fn hgetall(&self, key: &str) -> RecallResult<HashMap<String, String>> {
        if !self.is_enabled() {
            return Ok(HashMap::new());
        }

        with_timeout(self.operation_timeout, "hgetall", async {
            let mut conn = self.get_conn().await?;
            let fields: HashMap<String, String> = conn
                .hgetall(key)
                .await
                .map_err(|e| RecallError::Cache(format!("Failed to read hash '{key}': {e}")))?;

            debug!(key, fields = fields.len(), "Read cached hash");
            Ok(fields)
        })
        .await
    }

    async fn hdel(&self, key: &str, field: &str) -> RecallResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        with_timeout(self.operation_timeout, "hdel", async {
            let mut conn = self.get_conn().await?;
            let removed: i64 = conn.hdel(key, field).await.map_err(|e| {
                RecallError::Cache(format!("Failed to delete field '{key}/{field}': {e}"))
            })?;

            debug!(key, field, removed = removed > 0, "Deleted cached field");
            Ok(removed > 0)
        })
        .await
    }

    async fn delete(&self, key: &str) -> RecallResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        with_timeout(self.operation_timeout, "del", async {
            let mut conn = self.get_conn().await?;
            let deleted: i64 = conn
                .del(key)
                .await
                .map_err(|e| RecallError::Cache(format!("Failed to delete key '{key}': {e}")))?;

            debug!(key, deleted = deleted > 0, "Deleted cached key");
            Ok(deleted > 0)
        })
        .await
    }

    async fn ping(&self) -> RecallResult<()> {
        if !self.is_enabled() {
            return Err(RecallError::Cache("Cache is disabled".to_string()));
        }

        with_timeout(self.operation_timeout, "ping", async {
            let mut conn = self.get_conn().await?;
            let _: String = redis::cmd("PING")
                .query_async(&mut *conn)
                .await
                .map_err(|e| RecallError::Cache(format!("Ping failed: {e}")))?;
            Ok(())
        })
        .await
    }
}

/// Builds the shared Redis pool. Returns `None` when Redis is disabled.
///
/// The pool connects lazily, so an unreachable server does not block
/// startup; the cache then degrades until Redis comes back.
pub fn create_redis_pool(config: &RedisConfig) -> RecallResult<Option<Arc<Pool>>> {
    if !config.enabled {
        info!("Redis cache disabled by configuration");
        return Ok(None);
    }

    let pool = Config::from_url(&config.url)
        .builder()
        .map_err(|e| RecallError::Configuration(format!("Invalid Redis config: {e}")))?
        .max_size(usize::try_from(config.pool_size).unwrap_or(usize::MAX))
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| RecallError::Configuration(format!("Failed to create Redis pool: {e}")))?;

    info!(url = %config.url, pool_size = config.pool_size, "Redis connection pool created");
    Ok(Some(Arc::new(pool)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_cache() {
        let cache = RedisCacheService::disabled();
        assert!(!cache.is_enabled());
    }

    #[tokio::test]
    async fn test_disabled_cache_reads_empty_and_ignores_writes() {
        let cache = RedisCacheService::disabled();

        cache
            .hset_with_expiry("category:u1", &[("1".to_string(), "{}".to_string())], DEFAULT_TTL)
            .await
            .unwrap();
        assert!(cache.hgetall("category:u1").await.unwrap().is_empty());
        assert_eq!(cache.hget("category:u1", "1").await.unwrap(), None);
        assert!(!cache.hdel("category:u1", "1").await.unwrap());
        assert!(!cache.delete("category:u1").await.unwrap());
        assert!(cache.ping().await.is_err());
    }

    #[test]
    fn test_disabled_config_builds_no_pool() {
        let config = RedisConfig {
            enabled: false,
            ..RedisConfig::default()
        };
        assert!(create_redis_pool(&config).unwrap().is_none());
    }

    #[test]
    fn test_ttl_is_at_least_one_second() {
        assert_eq!(ttl_secs(Duration::from_millis(10)), 1);
        assert_eq!(ttl_secs(DEFAULT_TTL), 300);
    }
}
