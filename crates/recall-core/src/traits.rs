//! Core traits shared across layers.

use std::fmt::Display;

/// Trait for entities with a store-assigned identifier.
///
/// The identifier's `Display` form is what the cache uses as the hash field
/// name, so it must be stable and unique within one owner's collection.
pub trait Entity {
    /// Identifier type.
    type Id: Display + Copy + Ord;

    /// Returns the entity's unique identifier.
    fn id(&self) -> Self::Id;
}
