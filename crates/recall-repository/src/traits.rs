//! Repository trait definitions.
//!
//! Every query is scoped to the owning user. Mutations report whether a row
//! matched so callers can distinguish "not found" from success.

use async_trait::async_trait;
use recall_core::{
    Category, CategoryId, Flashcard, FlashcardChanges, FlashcardId, Interface, NewFlashcard,
    RecallResult, UserId,
};

/// Category repository trait.
#[async_trait]
pub trait CategoryRepository: Interface + Send + Sync {
    /// Inserts a category and returns the store-assigned id.
    async fn insert(&self, user_id: &UserId, name: &str) -> RecallResult<CategoryId>;

    /// Lists every category owned by the user.
    async fn find_all(&self, user_id: &UserId) -> RecallResult<Vec<Category>>;

    /// Renames a category.
    async fn update(&self, user_id: &UserId, id: CategoryId, name: &str) -> RecallResult<bool>;

    /// Deletes a category together with its flashcards.
    async fn delete(&self, user_id: &UserId, id: CategoryId) -> RecallResult<bool>;
}

/// Flashcard repository trait.
#[async_trait]
pub trait FlashcardRepository: Interface + Send + Sync {
    /// Inserts one flashcard and returns the store-assigned id.
    async fn insert(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        flashcard: &NewFlashcard,
    ) -> RecallResult<FlashcardId>;

    /// Inserts a batch in a single statement and returns the row count.
    async fn insert_many(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        flashcards: &[NewFlashcard],
    ) -> RecallResult<u64>;

    /// Lists the flashcards of one category.
    async fn find_by_category(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
    ) -> RecallResult<Vec<Flashcard>>;

    /// Finds one flashcard.
    async fn find_by_id(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        id: FlashcardId,
    ) -> RecallResult<Option<Flashcard>>;

    /// Replaces name and content, and moves the card when
    /// `changes.category_id` is set.
    async fn update(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        id: FlashcardId,
        changes: &FlashcardChanges,
    ) -> RecallResult<bool>;

    /// Deletes one flashcard.
    async fn delete(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        id: FlashcardId,
    ) -> RecallResult<bool>;
}
