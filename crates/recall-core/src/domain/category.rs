//! Category entity.

use crate::{CategoryId, Entity, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named group of flashcards owned by one user.
///
/// The serialized form doubles as the cache snapshot stored in the
/// `category:<userId>` hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Store-assigned identifier, immutable after creation.
    pub id: CategoryId,

    /// Display name.
    pub name: String,

    /// Owning user.
    #[serde(rename = "userId")]
    pub owner_id: UserId,

    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Category {
    /// Builds the snapshot of a freshly inserted category.
    ///
    /// Timestamps are left unset: the store assigns them and the snapshot
    /// must not invent values the store never holds.
    #[must_use]
    pub fn created(id: CategoryId, owner_id: UserId, name: String) -> Self {
        Self {
            id,
            name,
            owner_id,
            created_at: None,
            updated_at: None,
        }
    }

    /// Renames the category. Only the name changes.
    pub fn rename(&mut self, name: String) {
        self.name = name;
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> CategoryId {
        self.id
    }
}
