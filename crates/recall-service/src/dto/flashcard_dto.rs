//! Flashcard-related DTOs.

use recall_core::{rules, CategoryId, FlashcardChanges, NewFlashcard};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Largest accepted batch in one create request.
pub const MAX_BATCH_SIZE: u64 = 500;

/// Request to create a flashcard.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateFlashcardRequest {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "rules::not_blank", message = "Name cannot be blank")
    )]
    pub name: String,

    #[validate(length(max = 65535, message = "Content cannot exceed 65535 characters"))]
    #[serde(default)]
    pub content: String,
}

impl From<CreateFlashcardRequest> for NewFlashcard {
    fn from(request: CreateFlashcardRequest) -> Self {
        Self {
            name: request.name,
            content: request.content,
        }
    }
}

/// Request to create several flashcards in one category.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateFlashcardBatchRequest {
    #[validate(
        length(min = 1, max = 500, message = "A batch holds 1-500 flashcards"),
        nested
    )]
    pub flashcards: Vec<CreateFlashcardRequest>,
}

/// Request to update a flashcard.
///
/// Setting `categoryId` to a different category moves the card.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFlashcardRequest {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "rules::not_blank", message = "Name cannot be blank")
    )]
    pub name: String,

    #[validate(length(max = 65535, message = "Content cannot exceed 65535 characters"))]
    #[serde(default)]
    pub content: String,

    #[validate(custom(function = "positive_category"))]
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

impl From<UpdateFlashcardRequest> for FlashcardChanges {
    fn from(request: UpdateFlashcardRequest) -> Self {
        Self {
            name: request.name,
            content: request.content,
            category_id: request.category_id,
        }
    }
}

/// Count returned after a batch insert.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatchCreatedResponse {
    pub created: u64,
}

fn positive_category(category_id: &CategoryId) -> Result<(), ValidationError> {
    if category_id.value() > 0 {
        Ok(())
    } else {
        Err(ValidationError::new("positive_category_id"))
    }
}
