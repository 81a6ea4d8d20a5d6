//! Owner identity extractor.

use crate::responses::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use recall_core::{RecallError, UserId};

/// Request header carrying the owner id, set by the upstream gateway.
pub const USER_ID_HEADER: &str = "user_id";

/// Extractor for the calling user's id.
///
/// Rejects with 400 when the header is missing, blank, or not UTF-8, before
/// the handler touches either store.
#[derive(Debug, Clone)]
pub struct UserIdHeader(pub UserId);

impl std::ops::Deref for UserIdHeader {
    type Target = UserId;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for UserIdHeader
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                AppError(RecallError::validation(format!(
                    "Missing {USER_ID_HEADER} header"
                )))
            })?;

        Ok(Self(UserId::parse(raw)?))
    }
}
