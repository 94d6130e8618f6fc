//! # API Error Types
//!
//! Unified error handling for the HTTP layer.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use recipe_domain::DomainError;
use recipe_persistence::PersistenceError;

/// API-level errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid recipe id: {0}")]
    InvalidId(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::InvalidId(_) => StatusCode::BAD_REQUEST,
            Self::Persistence(PersistenceError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Persistence(PersistenceError::CacheUnavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::InvalidId(_) => "INVALID_ID",
            Self::Persistence(PersistenceError::NotFound { .. }) => "NOT_FOUND",
            Self::Persistence(PersistenceError::CacheUnavailable(_)) => "CACHE_UNAVAILABLE",
            Self::Persistence(PersistenceError::Store(_)) => "STORE_ERROR",
            Self::Persistence(PersistenceError::Serialization(_)) => "SERIALIZATION_ERROR",
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::InvalidInput(msg),
            DomainError::InvalidId(raw) => Self::InvalidId(raw),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = serde_json::json!({
            "error": {
                "message": self.to_string(),
                "code": self.error_code(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found = ApiError::from(PersistenceError::NotFound {
            entity_type: "recipe".to_string(),
            key: "x".to_string(),
        });
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let cache = ApiError::from(PersistenceError::CacheUnavailable("down".to_string()));
        assert_eq!(cache.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(cache.error_code(), "CACHE_UNAVAILABLE");

        let store = ApiError::from(PersistenceError::Store("down".to_string()));
        assert_eq!(store.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let invalid = ApiError::from(DomainError::InvalidId("abc".to_string()));
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
    }
}
