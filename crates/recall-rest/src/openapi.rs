//! OpenAPI documentation configuration.

use crate::controllers::flashcard_controller::CreateFlashcardsBody;
use crate::controllers::{HealthResponse, ReadinessResponse};
use recall_core::{Category, CategoryId, ErrorResponse, FieldError, Flashcard, FlashcardId, UserId};
use recall_service::{
    BatchCreatedResponse, CreateCategoryRequest, CreateFlashcardRequest, UpdateCategoryRequest,
    UpdateFlashcardRequest,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the Recall API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recall API",
        version = "1.0.0",
        description = "Categories and flashcards with a Redis cache-aside layer"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        crate::controllers::category_controller::list_categories,
        crate::controllers::category_controller::create_category,
        crate::controllers::category_controller::update_category,
        crate::controllers::category_controller::delete_category,
        crate::controllers::flashcard_controller::list_flashcards,
        crate::controllers::flashcard_controller::create_flashcards,
        crate::controllers::flashcard_controller::get_flashcard,
        crate::controllers::flashcard_controller::update_flashcard,
        crate::controllers::flashcard_controller::delete_flashcard,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            UserId,
            CategoryId,
            FlashcardId,
            Category,
            Flashcard,
            ErrorResponse,
            FieldError,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            CreateFlashcardRequest,
            CreateFlashcardsBody,
            UpdateFlashcardRequest,
            BatchCreatedResponse,
            HealthResponse,
            ReadinessResponse,
        )
    ),
    modifiers(&UserIdHeaderAddon),
    tags(
        (name = "categories", description = "Category endpoints"),
        (name = "flashcards", description = "Flashcard endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Documents the `user_id` header set by the upstream gateway.
struct UserIdHeaderAddon;

impl Modify for UserIdHeaderAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "user_id",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    crate::extractors::USER_ID_HEADER,
                    "Owner id supplied by the gateway",
                ))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/category",
            "/category/{category_id}",
            "/category/{category_id}/flashcards",
            "/category/{category_id}/flashcards/{flashcard_id}",
            "/health",
            "/ready",
            "/live",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
