//! Category service trait definition.

use crate::dto::{CachedRead, CreateCategoryRequest, UpdateCategoryRequest};
use async_trait::async_trait;
use recall_core::{Category, CategoryId, Interface, RecallResult, UserId};

/// Category use cases.
///
/// Mutations return once the durable store has committed; cache
/// reconciliation runs afterwards on a detached task.
#[async_trait]
pub trait CategoryService: Interface + Send + Sync {
    /// Creates a category for the user.
    async fn create_category(
        &self,
        user_id: &UserId,
        request: CreateCategoryRequest,
    ) -> RecallResult<Category>;

    /// Lists the user's categories, cache first.
    async fn get_categories(&self, user_id: &UserId) -> RecallResult<CachedRead<Vec<Category>>>;

    /// Renames a category.
    async fn update_category(
        &self,
        user_id: &UserId,
        id: CategoryId,
        request: UpdateCategoryRequest,
    ) -> RecallResult<()>;

    /// Deletes a category and its flashcards.
    async fn delete_category(&self, user_id: &UserId, id: CategoryId) -> RecallResult<()>;
}
