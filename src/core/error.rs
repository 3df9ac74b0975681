//! Typed errors for invoice actions
//!
//! Validation failures are not errors here: they come back as data (see
//! [`crate::actions::ActionOutcome::Invalid`]). What remains are persistence
//! failures, which are fatal for the request and carry a message naming the
//! operation that failed.
//!
//! # Example
//!
//! ```rust,ignore
//! match actions.delete_invoice(id).await {
//!     Ok(()) => {}
//!     Err(err @ ActionError::Delete(_)) => {
//!         assert!(err.to_string().starts_with("There was an error deleting:"));
//!     }
//!     Err(other) => return Err(other.into()),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// A write to the invoice store failed
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("There was an error creating: {0}")]
    Create(anyhow::Error),

    #[error("There was an error updating: {0}")]
    Update(anyhow::Error),

    #[error("There was an error deleting: {0}")]
    Delete(anyhow::Error),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ActionError {
    /// The operation that failed: "create", "update" or "delete"
    pub fn operation(&self) -> &'static str {
        match self {
            ActionError::Create(_) => "create",
            ActionError::Update(_) => "update",
            ActionError::Delete(_) => "delete",
        }
    }

    /// The underlying store failure
    pub fn cause(&self) -> &anyhow::Error {
        match self {
            ActionError::Create(e) | ActionError::Update(e) | ActionError::Delete(e) => e,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ActionError::Create(_) => "INVOICE_CREATE_FAILED",
            ActionError::Update(_) => "INVOICE_UPDATE_FAILED",
            ActionError::Delete(_) => "INVOICE_DELETE_FAILED",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}
