//! Validated JSON extractor for automatic request validation.
//!
//! `ValidatedJson<T>` deserializes JSON and validates it with the `validator`
//! crate. Malformed bodies get 400; validation failures get 422 with
//! field-level details.

use crate::responses::ApiResponse;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use recall_core::{ErrorResponse, FieldError};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// JSON extractor that validates the deserialized value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Rejection type for validated JSON extraction.
#[derive(Debug)]
pub enum ValidatedJsonRejection {
    /// JSON parsing/deserialization error.
    JsonError(JsonRejection),
    /// Validation error with field-level details.
    ValidationError(ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::JsonError(rejection) => {
                let error_response = ErrorResponse {
                    code: "INVALID_JSON".to_string(),
                    message: format!("Invalid JSON: {rejection}"),
                    details: None,
                    trace_id: None,
                };
                (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<()>::error(error_response)),
                )
                    .into_response()
            }
            Self::ValidationError(errors) => {
                let error_response = ErrorResponse {
                    code: "VALIDATION_ERROR".to_string(),
                    message: "Request validation failed".to_string(),
                    details: Some(convert_validation_errors(&errors)),
                    trace_id: None,
                };
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ApiResponse::<()>::error(error_response)),
                )
                    .into_response()
            }
        }
    }
}

/// Flattens validator errors, prefixing nested and list paths.
fn convert_validation_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors = recall_core::field_errors(errors);

    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Struct(nested) => {
                field_errors.extend(convert_validation_errors(nested).into_iter().map(|e| {
                    FieldError {
                        field: format!("{field}.{}", e.field),
                        ..e
                    }
                }));
            }
            ValidationErrorsKind::List(items) => {
                for (index, item) in items {
                    field_errors.extend(convert_validation_errors(item).into_iter().map(|e| {
                        FieldError {
                            field: format!("{field}[{index}].{}", e.field),
                            ..e
                        }
                    }));
                }
            }
            ValidationErrorsKind::Field(_) => {}
        }
    }

    field_errors
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_service::{CreateFlashcardBatchRequest, CreateFlashcardRequest};

    fn card(name: &str) -> CreateFlashcardRequest {
        CreateFlashcardRequest {
            name: name.to_string(),
            content: String::new(),
        }
    }

    #[test]
    fn test_list_errors_carry_index() {
        let request = CreateFlashcardBatchRequest {
            flashcards: vec![card("ok"), card("  ")],
        };

        let errors = request.validate().unwrap_err();
        let fields = convert_validation_errors(&errors);

        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "flashcards[1].name");
    }

    #[test]
    fn test_top_level_field_error() {
        let errors = card("").validate().unwrap_err();
        let fields = convert_validation_errors(&errors);

        assert!(fields.iter().all(|f| f.field == "name"));
        assert!(fields.iter().any(|f| f.code == "length"));
    }
}
