//! Data Transfer Objects (DTOs).

mod category_dto;
mod flashcard_dto;

pub use category_dto::*;
pub use flashcard_dto::*;

/// Result of a cache-aside read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedRead<T> {
    /// The entities returned to the caller.
    pub value: T,
    /// True when the value came from the cache without touching the store.
    pub cache_hit: bool,
}

impl<T> CachedRead<T> {
    /// Value served from the cache.
    pub const fn hit(value: T) -> Self {
        Self {
            value,
            cache_hit: true,
        }
    }

    /// Value served from the durable store.
    pub const fn miss(value: T) -> Self {
        Self {
            value,
            cache_hit: false,
        }
    }
}
