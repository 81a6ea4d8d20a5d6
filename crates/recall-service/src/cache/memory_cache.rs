//! In-process hash cache with Redis-compatible expiry semantics.
//!
//! Expiry uses `tokio::time::Instant`, so tests can drive it with a paused
//! clock. Expired keys are dropped lazily on the next access.

use super::CacheInterface;
use async_trait::async_trait;
use parking_lot::RwLock;
use recall_core::RecallResult;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;

#[derive(Debug, Clone)]
struct HashValue {
    fields: HashMap<String, String>,
    /// TTL for the entire hash, not individual fields.
    expires_at: Option<Instant>,
}

impl HashValue {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Hash store kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryHashCache {
    hashes: RwLock<HashMap<String, HashValue>>,
}

impl InMemoryHashCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time left before `key` expires, `None` if absent or persistent.
    #[must_use]
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        let hashes = self.hashes.read();
        let value = hashes.get(key).filter(|v| !v.is_expired(now))?;
        value.expires_at.map(|at| at.saturating_duration_since(now))
    }

    /// Number of live keys.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.hashes
            .read()
            .values()
            .filter(|v| !v.is_expired(now))
            .count()
    }

    /// Returns true when no live key remains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_live<R>(&self, key: &str, f: impl FnOnce(Option<&HashValue>) -> R) -> R {
        let now = Instant::now();
        {
            let hashes = self.hashes.read();
            match hashes.get(key) {
                Some(value) if value.is_expired(now) => {}
                other => return f(other),
            }
        }

        // Upgrade to evict the expired key.
        let mut hashes = self.hashes.write();
        if hashes.get(key).is_some_and(|v| v.is_expired(now)) {
            trace!(key, "Evicting expired hash");
            hashes.remove(key);
        }
        f(hashes.get(key))
    }
}

#[async_trait]
impl CacheInterface for InMemoryHashCache {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn hset_with_expiry(
        &self,
        key: &str,
        entries: &[(String, String)],
        ttl: Duration,
    ) -> RecallResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let now = Instant::now();
        let mut hashes = self.hashes.write();
        let value = hashes.entry(key.to_string()).or_insert_with(|| HashValue {
            fields: HashMap::new(),
            expires_at: None,
        });
        if value.is_expired(now) {
            value.fields.clear();
        }

        value.fields.extend(entries.iter().cloned());
        value.expires_at = Some(now + ttl);
        trace!(key, fields = entries.len(), "HSET with expiry");
        Ok(())
    }

    async fn hget(&self, key: &str, field: &str) -> RecallResult<Option<String>> {
        Ok(self.read_live(key, |value| value.and_then(|v| v.fields.get(field).cloned())))
    }

    async fn hgetall(&self, key: &str) -> RecallResult<HashMap<String, String>> {
        Ok(self.read_live(key, |value| {
            value.map(|v| v.fields.clone()).unwrap_or_default()
        }))
    }

    async fn hdel(&self, key: &str, field: &str) -> RecallResult<bool> {
        let now = Instant::now();
        let mut hashes = self.hashes.write();
        let Some(value) = hashes.get_mut(key) else {
            return Ok(false);
        };
        if value.is_expired(now) {
            hashes.remove(key);
            return Ok(false);
        }

        let removed = value.fields.remove(field).is_some();
        // Redis drops a hash once its last field is gone.
        if value.fields.is_empty() {
            hashes.remove(key);
        }
        Ok(removed)
    }

    async fn delete(&self, key: &str) -> RecallResult<bool> {
        let now = Instant::now();
        Ok(self
            .hashes
            .write()
            .remove(key)
            .is_some_and(|v| !v.is_expired(now)))
    }

    async fn ping(&self) -> RecallResult<()> {
        Ok(())
    }
}
