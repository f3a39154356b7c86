//! Maps core errors onto HTTP responses.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

use dns_console_core::CoreError;

/// Newtype over [`CoreError`] carrying the HTTP mapping.
///
/// Handlers return `Result<_, ApiError>`; the `?` operator lifts any
/// `CoreError` into a response with the right status and an
/// `{"error": "<message>"}` body.
#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            CoreError::Forbidden(_) => StatusCode::FORBIDDEN,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::Conflict(_) => StatusCode::CONFLICT,
            CoreError::ConfigIncomplete(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CoreError::Auth(_) | CoreError::ProviderUnavailable(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.0.is_expected() {
            tracing::warn!(error = %self.0, "request failed");
        } else {
            tracing::error!(error = %self.0, "request failed");
        }
        HttpResponse::build(self.status_code()).json(json!({ "error": self.0.to_string() }))
    }
}
