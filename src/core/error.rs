//! Typed error handling for quote operations
//!
//! Store internals report failures with `anyhow`; the access layer converts
//! them into [`QuoteError`] so callers can match on the case they care about.
//!
//! # Error Categories
//!
//! - `NotFound`: the operation targets an id that does not exist
//! - `Validation`: form-level field violations, collected per field
//! - `OperationFailed`: an unexpected failure while manipulating the store
//!
//! # Example
//!
//! ```rust,ignore
//! match service.delete(42).await {
//!     Ok(()) => println!("deleted"),
//!     Err(e) if e.is_not_found() => println!("already gone"),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

use crate::core::entity::RecordId;
use crate::core::validation::ValidationErrors;

/// The main error type for quote operations
#[derive(Debug)]
pub enum QuoteError {
    /// No record with this id
    NotFound { entity_type: String, id: RecordId },

    /// Input failed validation
    Validation(ValidationErrors),

    /// The store could not complete the operation
    OperationFailed {
        entity_type: String,
        operation: String,
        message: String,
    },
}

impl fmt::Display for QuoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteError::NotFound { entity_type, id } => {
                write!(f, "{} with id '{}' not found", entity_type, id)
            }
            QuoteError::Validation(errors) => write!(f, "{}", errors),
            QuoteError::OperationFailed {
                entity_type,
                operation,
                message,
            } => {
                write!(f, "Failed to {} {}: {}", operation, entity_type, message)
            }
        }
    }
}

impl std::error::Error for QuoteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuoteError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl QuoteError {
    pub fn not_found(id: RecordId) -> Self {
        QuoteError::NotFound {
            entity_type: "quote".to_string(),
            id,
        }
    }

    pub fn operation_failed(operation: &str, message: impl fmt::Display) -> Self {
        QuoteError::OperationFailed {
            entity_type: "quote".to_string(),
            operation: operation.to_string(),
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, QuoteError::NotFound { .. })
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            QuoteError::NotFound { .. } => StatusCode::NOT_FOUND,
            QuoteError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            QuoteError::OperationFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            QuoteError::NotFound { .. } => "QUOTE_NOT_FOUND",
            QuoteError::Validation(_) => "VALIDATION_ERROR",
            QuoteError::OperationFailed { .. } => "QUOTE_OPERATION_FAILED",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            QuoteError::NotFound { entity_type, id } => Some(serde_json::json!({
                "entity_type": entity_type,
                "id": id
            })),
            QuoteError::Validation(errors) => Some(serde_json::json!({ "fields": errors })),
            QuoteError::OperationFailed { .. } => None,
        }
    }
}

impl From<ValidationErrors> for QuoteError {
    fn from(errors: ValidationErrors) -> Self {
        QuoteError::Validation(errors)
    }
}

impl IntoResponse for QuoteError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}
