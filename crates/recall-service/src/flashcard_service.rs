//! Flashcard service trait definition.

use crate::dto::{
    CachedRead, CreateFlashcardBatchRequest, CreateFlashcardRequest, UpdateFlashcardRequest,
};
use async_trait::async_trait;
use recall_core::{CategoryId, Flashcard, FlashcardId, Interface, RecallResult, UserId};

/// Flashcard use cases, scoped to one category of one user.
#[async_trait]
pub trait FlashcardService: Interface + Send + Sync {
    /// Creates one flashcard.
    async fn create_flashcard(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        request: CreateFlashcardRequest,
    ) -> RecallResult<Flashcard>;

    /// Creates a batch of flashcards and returns how many were stored.
    async fn create_flashcards(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        request: CreateFlashcardBatchRequest,
    ) -> RecallResult<u64>;

    /// Lists a category's flashcards, cache first.
    async fn get_flashcards(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
    ) -> RecallResult<CachedRead<Vec<Flashcard>>>;

    /// Reads one flashcard, cache first.
    async fn get_flashcard(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        id: FlashcardId,
    ) -> RecallResult<CachedRead<Flashcard>>;

    /// Updates a flashcard, moving it when the payload names another category.
    async fn update_flashcard(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        id: FlashcardId,
        request: UpdateFlashcardRequest,
    ) -> RecallResult<()>;

    /// Deletes a flashcard.
    async fn delete_flashcard(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        id: FlashcardId,
    ) -> RecallResult<()>;
}
