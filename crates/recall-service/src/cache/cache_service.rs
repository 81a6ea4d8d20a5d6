//! Typed entity snapshots over the raw hash cache.

use super::CacheInterface;
use recall_core::{Entity, RecallError, RecallResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Serializes entities into hash fields keyed by entity id and applies the
/// TTL on every write.
///
/// Every error it returns is a soft failure
/// ([`RecallError::is_cache_soft_failure`]); callers log it and fall back to
/// the durable store.
#[derive(Clone)]
pub struct CacheService {
    cache: Arc<dyn CacheInterface>,
    ttl: Duration,
}

impl CacheService {
    /// Creates a cache service writing with `ttl`.
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    /// TTL applied to every write.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Writes the whole collection in one batch and refreshes the key's TTL.
    pub async fn save_collection<T>(&self, key: &str, entities: &[T]) -> RecallResult<()>
    where
        T: Entity + Serialize + Sync,
    {
        if entities.is_empty() {
            return Ok(());
        }

        let entries = entities
            .iter()
            .map(|entity| -> RecallResult<(String, String)> {
                Ok((entity.id().to_string(), serde_json::to_string(entity)?))
            })
            .collect::<RecallResult<Vec<_>>>()?;

        self.cache.hset_with_expiry(key, &entries, self.ttl).await?;
        debug!(key, count = entries.len(), "Saved collection to cache");
        Ok(())
    }

    /// Writes one entity and refreshes the TTL of the whole key.
    pub async fn save_one<T>(&self, key: &str, field: impl Display + Send, entity: &T) -> RecallResult<()>
    where
        T: Serialize + Sync,
    {
        let entries = [(field.to_string(), serde_json::to_string(entity)?)];
        self.cache.hset_with_expiry(key, &entries, self.ttl).await
    }

    /// Reads one entity.
    ///
    /// An absent field and an undecodable value both report
    /// [`RecallError::CacheMiss`].
    pub async fn get_one<T>(&self, key: &str, field: impl Display + Send) -> RecallResult<T>
    where
        T: DeserializeOwned,
    {
        let field = field.to_string();
        let raw = self
            .cache
            .hget(key, &field)
            .await?
            .ok_or_else(|| RecallError::cache_miss(key, &field))?;

        serde_json::from_str(&raw).map_err(|e| {
            debug!(key, field = %field, error = %e, "Discarding undecodable cache entry");
            RecallError::cache_miss(key, &field)
        })
    }

    /// Reads every entity under `key`, ordered by id.
    ///
    /// Empty when the key has no fields. The first undecodable value fails
    /// the whole read so callers never see a partial collection.
    pub async fn get_all<T>(&self, key: &str) -> RecallResult<Vec<T>>
    where
        T: Entity + DeserializeOwned,
    {
        let mut entities = self
            .cache
            .hgetall(key)
            .await?
            .values()
            .map(|raw| serde_json::from_str::<T>(raw).map_err(RecallError::from))
            .collect::<RecallResult<Vec<_>>>()?;

        entities.sort_by_key(|entity| entity.id());
        Ok(entities)
    }

    /// Removes one entity. Absent fields are not an error.
    pub async fn delete_field(&self, key: &str, field: impl Display + Send) -> RecallResult<()> {
        self.cache.hdel(key, &field.to_string()).await?;
        Ok(())
    }

    /// Removes a whole collection. Absent keys are not an error.
    pub async fn delete_key(&self, key: &str) -> RecallResult<()> {
        self.cache.delete(key).await?;
        Ok(())
    }

    /// Round-trips to the backend.
    pub async fn ping(&self) -> RecallResult<()> {
        self.cache.ping().await
    }

    /// Check if caching is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.cache.is_enabled()
    }
}

impl std::fmt::Debug for CacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheService")
            .field("enabled", &self.cache.is_enabled())
            .field("ttl", &self.ttl)
            .finish()
    }
}
