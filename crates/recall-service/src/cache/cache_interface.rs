//! Cache interface trait for hash-structured storage.

use async_trait::async_trait;
use recall_core::RecallResult;
use shaku::Interface;
use std::collections::HashMap;
use std::time::Duration;

/// Raw hash-map operations over a key-value store with per-key expiry.
///
/// Values are opaque strings so the trait stays dyn-compatible; typed
/// access lives in [`CacheService`](super::CacheService).
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Writes every `(field, value)` pair into the hash at `key` and resets
    /// the key's expiry to `ttl`, as one atomic unit.
    ///
    /// An empty `entries` slice is a no-op and does not touch the TTL.
    async fn hset_with_expiry(
        &self,
        key: &str,
        entries: &[(String, String)],
        ttl: Duration,
    ) -> RecallResult<()>;

    /// Reads one field. `None` if the key or the field is absent.
    async fn hget(&self, key: &str, field: &str) -> RecallResult<Option<String>>;

    /// Reads every field of the hash. Empty if the key is absent.
    async fn hgetall(&self, key: &str) -> RecallResult<HashMap<String, String>>;

    /// Removes one field. Returns `true` if it existed.
    async fn hdel(&self, key: &str, field: &str) -> RecallResult<bool>;

    /// Removes the whole key. Returns `true` if it existed.
    async fn delete(&self, key: &str) -> RecallResult<bool>;

    /// Round-trips to the backend.
    async fn ping(&self) -> RecallResult<()>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}
