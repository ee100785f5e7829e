// src/shared/error.rs
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::shared::api::ApiResponse;

/// Error taxonomy of the orchestrator, mapped once to HTTP status codes.
///
/// Domain services raise these; the REST layer renders them through the
/// `ResponseError` impl as the usual `{"status": code, "value": message}`
/// envelope.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Credentials absent or refused (401).
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but no access rule matched (403).
    #[error("{0}")]
    Forbidden(String),

    /// Malformed identifier or unusable request body (415).
    #[error("{0}")]
    UnsupportedMedia(String),

    /// Unknown entity, queue or unit (404).
    #[error("{0}")]
    NotFound(String),

    /// Missing field, bad value, duplicate unique key or broken domain rule (400).
    #[error("{0}")]
    Invalid(String),

    /// Deliberately unimplemented policy, e.g. external URIs (501).
    #[error("{0}")]
    NotImplemented(String),

    /// Communication failure the caller may retry (400, per API contract).
    #[error("{0}")]
    Transient(String),

    /// Anything else (500).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedMedia(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::NotImplemented(message.into())
    }

    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::UnsupportedMedia(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Invalid(_) | ApiError::Transient(_) => StatusCode::BAD_REQUEST,
            ApiError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        ApiResponse::error(self.status_code(), &self.to_string())
    }
}

/// Failures of the document-store adapters, translated by the services into
/// entity-specific `ApiError` messages.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique-key constraint was violated; `field` names the index.
    #[error("duplicate value for unique field {field}")]
    Duplicate { field: &'static str },

    #[error("{0}")]
    Backend(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { field } => {
                ApiError::invalid(format!("Duplicate value for unique field {field}."))
            }
            StoreError::Backend(message) => ApiError::internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_kind_to_its_status_code() {
        let cases = [
            (ApiError::unauthorized("a"), 401),
            (ApiError::forbidden("a"), 403),
            (ApiError::unsupported("a"), 415),
            (ApiError::not_found("a"), 404),
            (ApiError::invalid("a"), 400),
            (ApiError::transient("a"), 400),
            (ApiError::not_implemented("a"), 501),
            (ApiError::internal("a"), 500),
        ];
        for (error, code) in cases {
            assert_eq!(error.status_code().as_u16(), code, "{error:?}");
        }
    }

    #[test]
    fn duplicate_store_error_becomes_invalid() {
        let err: ApiError = StoreError::Duplicate { field: "mail" }.into();
        assert!(matches!(err, ApiError::Invalid(_)));
    }
}
