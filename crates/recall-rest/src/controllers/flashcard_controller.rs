//! Flashcard controller.

use crate::{
    extractors::{UserIdHeader, ValidatedJson},
    responses::{created, done, ApiResult, AppError, Cached},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use recall_core::{CategoryId, Flashcard, FlashcardId};
use recall_service::{
    BatchCreatedResponse, CreateFlashcardBatchRequest, CreateFlashcardRequest,
    UpdateFlashcardRequest, MAX_BATCH_SIZE,
};
use serde::Deserialize;
use tracing::debug;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

/// Creates the flashcard router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/category/:category_id/flashcards",
            get(list_flashcards).post(create_flashcards),
        )
        .route(
            "/category/:category_id/flashcards/:flashcard_id",
            get(get_flashcard)
                .put(update_flashcard)
                .delete(delete_flashcard),
        )
}

/// Body of a create request: one flashcard or an array of them.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CreateFlashcardsBody {
    Batch(Vec<CreateFlashcardRequest>),
    Single(CreateFlashcardRequest),
}

impl Validate for CreateFlashcardsBody {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Self::Single(card) => card.validate(),
            Self::Batch(cards) => validate_batch(cards),
        }
    }
}

/// Same rules as [`CreateFlashcardBatchRequest`], checked on the borrowed
/// cards. Errors are reported under `flashcards`.
fn validate_batch(cards: &[CreateFlashcardRequest]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let len = u64::try_from(cards.len()).unwrap_or(u64::MAX);

    if (1..=MAX_BATCH_SIZE).contains(&len) {
        errors.merge_self("flashcards", cards.validate());
    } else {
        let mut error = ValidationError::new("length")
            .with_message(format!("A batch holds 1-{MAX_BATCH_SIZE} flashcards").into());
        error.add_param("min".into(), &1);
        error.add_param("max".into(), &MAX_BATCH_SIZE);
        error.add_param("value".into(), &len);
        errors.add("flashcards", error);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// List a category's flashcards.
#[utoipa::path(
    get,
    path = "/category/{category_id}/flashcards",
    tag = "flashcards",
    params(
        ("user_id" = String, Header, description = "Owner id"),
        ("category_id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Flashcards, with x-cache HIT or MISS", body = Vec<Flashcard>)
    )
)]
pub async fn list_flashcards(
    State(state): State<AppState>,
    UserIdHeader(user_id): UserIdHeader,
    Path(category_id): Path<CategoryId>,
) -> Result<Cached<Vec<Flashcard>>, AppError> {
    debug!(user_id = %user_id, category_id = %category_id, "List flashcards request");

    let read = state
        .flashcard_service
        .get_flashcards(&user_id, category_id)
        .await?;
    Ok(Cached(read))
}

/// Create one flashcard, or a batch when the body is an array.
#[utoipa::path(
    post,
    path = "/category/{category_id}/flashcards",
    tag = "flashcards",
    params(
        ("user_id" = String, Header, description = "Owner id"),
        ("category_id" = i64, Path, description = "Category id")
    ),
    request_body = CreateFlashcardsBody,
    responses(
        (status = 201, description = "The created flashcard, or a BatchCreatedResponse for an array body", body = Flashcard),
        (status = 422, description = "Invalid payload", body = recall_core::ErrorResponse)
    )
)]
pub async fn create_flashcards(
    State(state): State<AppState>,
    UserIdHeader(user_id): UserIdHeader,
    Path(category_id): Path<CategoryId>,
    ValidatedJson(body): ValidatedJson<CreateFlashcardsBody>,
) -> Result<Response, AppError> {
    match body {
        CreateFlashcardsBody::Single(request) => {
            debug!(user_id = %user_id, category_id = %category_id, "Create flashcard request");
            let flashcard = state
                .flashcard_service
                .create_flashcard(&user_id, category_id, request)
                .await?;
            Ok(created(flashcard).into_response())
        }
        CreateFlashcardsBody::Batch(flashcards) => {
            debug!(
                user_id = %user_id,
                category_id = %category_id,
                count = flashcards.len(),
                "Create flashcard batch request"
            );
            let created_count = state
                .flashcard_service
                .create_flashcards(
                    &user_id,
                    category_id,
                    CreateFlashcardBatchRequest { flashcards },
                )
                .await?;
            Ok(created(BatchCreatedResponse {
                created: created_count,
            })
            .into_response())
        }
    }
}

/// Read one flashcard.
#[utoipa::path(
    get,
    path = "/category/{category_id}/flashcards/{flashcard_id}",
    tag = "flashcards",
    params(
        ("user_id" = String, Header, description = "Owner id"),
        ("category_id" = i64, Path, description = "Category id"),
        ("flashcard_id" = i64, Path, description = "Flashcard id")
    ),
    responses(
        (status = 200, description = "Flashcard, with x-cache HIT or MISS", body = Flashcard),
        (status = 404, description = "No such flashcard", body = recall_core::ErrorResponse)
    )
)]
pub async fn get_flashcard(
    State(state): State<AppState>,
    UserIdHeader(user_id): UserIdHeader,
    Path((category_id, flashcard_id)): Path<(CategoryId, FlashcardId)>,
) -> Result<Cached<Flashcard>, AppError> {
    debug!(user_id = %user_id, flashcard_id = %flashcard_id, "Get flashcard request");

    let read = state
        .flashcard_service
        .get_flashcard(&user_id, category_id, flashcard_id)
        .await?;
    Ok(Cached(read))
}

/// Update a flashcard, moving it when `categoryId` names another category.
#[utoipa::path(
    put,
    path = "/category/{category_id}/flashcards/{flashcard_id}",
    tag = "flashcards",
    params(
        ("user_id" = String, Header, description = "Owner id"),
        ("category_id" = i64, Path, description = "Category id"),
        ("flashcard_id" = i64, Path, description = "Flashcard id")
    ),
    request_body = UpdateFlashcardRequest,
    responses(
        (status = 200, description = "Flashcard updated"),
        (status = 404, description = "No such flashcard", body = recall_core::ErrorResponse)
    )
)]
pub async fn update_flashcard(
    State(state): State<AppState>,
    UserIdHeader(user_id): UserIdHeader,
    Path((category_id, flashcard_id)): Path<(CategoryId, FlashcardId)>,
    ValidatedJson(request): ValidatedJson<UpdateFlashcardRequest>,
) -> ApiResult<()> {
    debug!(user_id = %user_id, flashcard_id = %flashcard_id, "Update flashcard request");

    state
        .flashcard_service
        .update_flashcard(&user_id, category_id, flashcard_id, request)
        .await?;
    done()
}

/// Delete a flashcard.
#[utoipa::path(
    delete,
    path = "/category/{category_id}/flashcards/{flashcard_id}",
    tag = "flashcards",
    params(
        ("user_id" = String, Header, description = "Owner id"),
        ("category_id" = i64, Path, description = "Category id"),
        ("flashcard_id" = i64, Path, description = "Flashcard id")
    ),
    responses(
        (status = 200, description = "Flashcard deleted"),
        (status = 404, description = "No such flashcard", body = recall_core::ErrorResponse)
    )
)]
pub async fn delete_flashcard(
    State(state): State<AppState>,
    UserIdHeader(user_id): UserIdHeader,
    Path((category_id, flashcard_id)): Path<(CategoryId, FlashcardId)>,
) -> ApiResult<()> {
    debug!(user_id = %user_id, flashcard_id = %flashcard_id, "Delete flashcard request");

    state
        .flashcard_service
        .delete_flashcard(&user_id, category_id, flashcard_id)
        .await?;
    done()
}
