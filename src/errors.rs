// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Error enum for the layers that are allowed to fail
/// Each variant maps to appropriate HTTP status code and error response
///
/// Note: the aggregation operations themselves have total contracts and
/// never surface these to callers; this enum covers the HTTP surface,
/// the provider clients and the persistence layer.
#[derive(Error, Debug)]
pub enum ServicesError {
    #[error("Service not found with id: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Convert ServicesError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for ServicesError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_code) = match self {
            ServicesError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ServicesError::DatabaseError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR")
            }
            ServicesError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            ServicesError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ServicesError::ExternalApiError(_) => (StatusCode::BAD_GATEWAY, "EXTERNAL_API_ERROR"),
            ServicesError::RateLimitExceeded => {
                (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMIT_EXCEEDED")
            }
        };

        let body = json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(status).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ServicesError::NotFound(_) => StatusCode::NOT_FOUND,
            ServicesError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServicesError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServicesError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ServicesError::ExternalApiError(_) => StatusCode::BAD_GATEWAY,
            ServicesError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}
