//! Category controller.

use crate::{
    extractors::{UserIdHeader, ValidatedJson},
    responses::{created, done, ApiResponse, ApiResult, AppError, Cached},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use recall_core::{Category, CategoryId};
use recall_service::{CreateCategoryRequest, UpdateCategoryRequest};
use tracing::debug;

/// Creates the category router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/category", get(list_categories).post(create_category))
        .route(
            "/category/:category_id",
            put(update_category).delete(delete_category),
        )
}

/// List the caller's categories.
#[utoipa::path(
    get,
    path = "/category",
    tag = "categories",
    params(("user_id" = String, Header, description = "Owner id")),
    responses(
        (status = 200, description = "Categories, with x-cache HIT or MISS", body = Vec<Category>),
        (status = 400, description = "Missing user_id header", body = recall_core::ErrorResponse)
    )
)]
pub async fn list_categories(
    State(state): State<AppState>,
    UserIdHeader(user_id): UserIdHeader,
) -> Result<Cached<Vec<Category>>, AppError> {
    debug!(user_id = %user_id, "List categories request");

    let read = state.category_service.get_categories(&user_id).await?;
    Ok(Cached(read))
}

/// Create a category.
#[utoipa::path(
    post,
    path = "/category",
    tag = "categories",
    params(("user_id" = String, Header, description = "Owner id")),
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 422, description = "Invalid payload", body = recall_core::ErrorResponse)
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    UserIdHeader(user_id): UserIdHeader,
    ValidatedJson(request): ValidatedJson<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>), AppError> {
    debug!(user_id = %user_id, "Create category request");

    let category = state.category_service.create_category(&user_id, request).await?;
    Ok(created(category))
}

/// Rename a category.
#[utoipa::path(
    put,
    path = "/category/{category_id}",
    tag = "categories",
    params(
        ("user_id" = String, Header, description = "Owner id"),
        ("category_id" = i64, Path, description = "Category id")
    ),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated"),
        (status = 404, description = "No such category for this user", body = recall_core::ErrorResponse)
    )
)]
pub async fn update_category(
    State(state): State<AppState>,
    UserIdHeader(user_id): UserIdHeader,
    Path(category_id): Path<CategoryId>,
    ValidatedJson(request): ValidatedJson<UpdateCategoryRequest>,
) -> ApiResult<()> {
    debug!(user_id = %user_id, category_id = %category_id, "Update category request");

    state
        .category_service
        .update_category(&user_id, category_id, request)
        .await?;
    done()
}

/// Delete a category and its flashcards.
#[utoipa::path(
    delete,
    path = "/category/{category_id}",
    tag = "categories",
    params(
        ("user_id" = String, Header, description = "Owner id"),
        ("category_id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "No such category for this user", body = recall_core::ErrorResponse)
    )
)]
pub async fn delete_category(
    State(state): State<AppState>,
    UserIdHeader(user_id): UserIdHeader,
    Path(category_id): Path<CategoryId>,
) -> ApiResult<()> {
    debug!(user_id = %user_id, category_id = %category_id, "Delete category request");

    state
        .category_service
        .delete_category(&user_id, category_id)
        .await?;
    done()
}
