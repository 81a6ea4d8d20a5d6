//! Caching infrastructure for the service layer.
//!
//! Entities are cached as Redis hashes: one key per owner collection, one
//! field per entity id, a JSON snapshot as the value. The whole key shares a
//! single TTL that every write refreshes.
//!
//! ```text
//! CacheService            typed snapshots, TTL policy
//!   ↓  Arc<dyn CacheInterface>
//! RedisCacheService       deadpool-redis, MULTI/EXEC pipelines
//! InMemoryHashCache       same semantics, in-process
//! ```

mod cache_interface;
pub mod cache_keys;
mod cache_service;
mod memory_cache;
mod redis_cache;
mod timeout;

pub use cache_interface::CacheInterface;
pub use cache_service::CacheService;
pub use memory_cache::InMemoryHashCache;
pub use redis_cache::{
    create_redis_pool, RedisCacheService, RedisCacheServiceParameters, DEFAULT_OPERATION_TIMEOUT,
    DEFAULT_TTL,
};
pub use timeout::with_timeout;
