// Error handling module for the VISE API
// Provides the HTTP-facing error type and its response conversion

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::models::STATUS_REJECTED;
use crate::rules::RulesError;
use crate::validation;

/// Main error type for the API
/// All handlers return Result<T, ApiError>
///
/// Every variant is reported to the caller as a `Rejected` payload.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Field validation failures on the request body
    /// Maps to HTTP 400 Bad Request
    #[error("{}", validation::summarize(.0))]
    ValidationError(validator::ValidationErrors),

    /// Request body that is not valid JSON or does not match the expected shape
    /// (unknown card tier, wrong field type, missing field)
    /// Maps to HTTP 400 Bad Request
    #[error("{0}")]
    MalformedBody(String),

    /// Malformed input detected past field validation (e.g. an unparseable date)
    /// Maps to HTTP 400 Bad Request
    #[error("{0}")]
    InvalidInput(String),

    /// Client does not qualify for the requested tier
    /// Maps to HTTP 400 Bad Request
    #[error("{0}")]
    EligibilityRejected(String),

    /// Purchase blocked by a tier restriction
    /// Maps to HTTP 400 Bad Request
    #[error("{0}")]
    PurchaseRejected(String),

    /// Resource not found by ID
    /// Maps to HTTP 404 Not Found
    #[error("{resource} with id {id} not found")]
    NotFound { resource: String, id: String },

}

/// Consistent error response structure
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Always "Rejected"
    #[schema(example = "Rejected")]
    pub status: String,

    /// Human-readable reason
    #[schema(example = "Client does not have the VISE CLUB membership required for Platinum")]
    pub error: String,

    /// Machine-readable error code (e.g. "ELIGIBILITY_REJECTED")
    #[schema(example = "ELIGIBILITY_REJECTED")]
    pub error_code: String,

    /// Field-level validation errors, omitted when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,

    /// RFC 3339 timestamp of when the error occurred
    pub timestamp: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = self.to_error_response();
        (status, Json(error_response)).into_response()
    }
}

impl ApiError {
    /// Machine-readable code of this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::ValidationError(_) | ApiError::MalformedBody(_) => "VALIDATION_ERROR",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::EligibilityRejected(_) => "ELIGIBILITY_REJECTED",
            ApiError::PurchaseRejected(_) => "PURCHASE_REJECTED",
            ApiError::NotFound { .. } => "NOT_FOUND",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_)
            | ApiError::MalformedBody(_)
            | ApiError::InvalidInput(_)
            | ApiError::EligibilityRejected(_)
            | ApiError::PurchaseRejected(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    /// Convert ApiError to HTTP status code and ErrorResponse
    ///
    /// Client errors log at debug, rule rejections at warn.
    fn to_error_response(&self) -> (StatusCode, ErrorResponse) {
        let (message, details) = match self {
            ApiError::ValidationError(errors) => {
                debug!("Validation error: {:?}", errors);
                (
                    self.to_string(),
                    Some(serde_json::to_value(errors).unwrap_or(serde_json::json!({}))),
                )
            }
            ApiError::MalformedBody(message) => {
                debug!("Malformed request body: {}", message);
                (message.clone(), None)
            }
            ApiError::InvalidInput(message) => {
                debug!("Invalid input: {}", message);
                (message.clone(), None)
            }
            ApiError::NotFound { resource, id } => {
                debug!("Resource not found: {} with id {}", resource, id);
                (self.to_string(), None)
            }
            ApiError::EligibilityRejected(reason) => {
                warn!("Registration rejected: {}", reason);
                (reason.clone(), None)
            }
            ApiError::PurchaseRejected(reason) => {
                warn!("Purchase rejected: {}", reason);
                (reason.clone(), None)
            }
        };

        (
            self.status_code(),
            ErrorResponse {
                status: STATUS_REJECTED.to_string(),
                error: message,
                error_code: self.error_code().to_string(),
                details,
                timestamp: Utc::now().to_rfc3339(),
            },
        )
    }
}

/// Convert validator errors to ApiError
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(errors)
    }
}

/// Convert body extraction failures to ApiError
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

/// Convert rule rejections to ApiError
impl From<RulesError> for ApiError {
    fn from(error: RulesError) -> Self {
        match error {
            RulesError::EligibilityRejected(reason) => ApiError::EligibilityRejected(reason),
            RulesError::PurchaseRejected(reason) => ApiError::PurchaseRejected(reason),
            malformed @ RulesError::MalformedTimestamp(_) => {
                ApiError::InvalidInput(malformed.to_string())
            }
        }
    }
}
