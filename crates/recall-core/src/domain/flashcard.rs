//! Flashcard entity.

use crate::{CategoryId, Entity, FlashcardId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single card belonging to one category and one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    /// Store-assigned identifier.
    pub id: FlashcardId,

    /// Card title.
    pub name: String,

    /// Card body.
    pub content: String,

    /// Owning category.
    pub category_id: CategoryId,

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

/// Fields supplied when inserting a flashcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFlashcard {
    pub name: String,
    pub content: String,
}

/// Replacement values for an update.
///
/// `category_id: None` keeps the card in its current category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardChanges {
    pub name: String,
    pub content: String,
    pub category_id: Option<CategoryId>,
}

impl Flashcard {
    /// Builds the snapshot of a freshly inserted flashcard, without the
    /// store-assigned timestamps.
    #[must_use]
    pub fn created(
        id: FlashcardId,
        owner_id: UserId,
        category_id: CategoryId,
        new: NewFlashcard,
    ) -> Self {
        Self {
            id,
            name: new.name,
            content: new.content,
            category_id,
            owner_id,
            created_at: None,
            updated_at: None,
        }
    }

    /// A flashcard only exists when it references a category.
    #[must_use]
    pub const fn is_existing(&self) -> bool {
        self.category_id.value() > 0
    }

    /// Applies an update payload to this snapshot. Timestamps are kept.
    pub fn apply(&mut self, changes: &FlashcardChanges) {
        self.name.clone_from(&changes.name);
        self.content.clone_from(&changes.content);
        if let Some(category_id) = changes.category_id {
            self.category_id = category_id;
        }
    }
}

impl Entity for Flashcard {
    type Id = FlashcardId;

    fn id(&self) -> FlashcardId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Flashcard {
        Flashcard::created(
            FlashcardId::new(9),
            UserId::parse("u1").unwrap(),
            CategoryId::new(2),
            NewFlashcard {
                name: "Cat".to_string(),
                content: "A small feline".to_string(),
            },
        )
    }

    #[test]
    fn test_is_existing_requires_positive_category() {
        let mut card = sample();
        assert!(card.is_existing());

        card.category_id = CategoryId::new(0);
        assert!(!card.is_existing());
    }

    #[test]
    fn test_apply_keeps_category_when_absent() {
        let mut card = sample();
        card.apply(&FlashcardChanges {
            name: "Dog".to_string(),
            content: "A loyal canine".to_string(),
            category_id: None,
        });

        assert_eq!(card.name, "Dog");
        assert_eq!(card.content, "A loyal canine");
        assert_eq!(card.category_id, CategoryId::new(2));
        assert!(card.created_at.is_none());
        assert!(card.updated_at.is_none());
    }

    #[test]
    fn test_apply_moves_category() {
        let mut card = sample();
        card.apply(&FlashcardChanges {
            name: "Cat".to_string(),
            content: "A small feline".to_string(),
            category_id: Some(CategoryId::new(5)),
        });
        assert_eq!(card.category_id, CategoryId::new(5));
    }

    #[test]
    fn test_snapshot_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["categoryId"], 2);
        assert_eq!(json["userId"], "u1");
        assert!(json.get("updatedAt").is_none());
    }
}
