//! Common error types and handling for Tenantgate

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Message returned to clients for every 5xx response
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Common error type for the Tenantgate service
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The caller already has a user row; carries the existing identifiers
    #[error("User already exists")]
    AlreadyExists {
        app_user_id: i64,
        organization_id: i64,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Authentication(_) => StatusCode::UNAUTHORIZED,
            Error::Validation(_) | Error::AlreadyExists { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Unexpected(_) | Error::Database(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Unexpected(_) => "UNEXPECTED_ERROR",
            Error::Database(_) => "DATABASE_ERROR",
            Error::Authentication(_) => "AUTHENTICATION_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::AlreadyExists { .. } => "ALREADY_EXISTS",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show to the client
    fn public_message(&self) -> String {
        match self {
            Error::Unexpected(_) | Error::Database(_) | Error::Internal(_) => {
                INTERNAL_MESSAGE.to_string()
            }
            Error::Authentication(msg) | Error::Validation(msg) | Error::NotFound(msg) => {
                msg.clone()
            }
            Error::AlreadyExists { .. } => self.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Full detail stays in the logs
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Internal server error");
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }

        let mut body = json!({
            "error": {
                "code": error_code,
                "message": self.public_message(),
            }
        });

        if let Error::AlreadyExists {
            app_user_id,
            organization_id,
        } = self
        {
            body["appUserId"] = json!(app_user_id);
            body["organizationId"] = json!(organization_id);
        }

        (status, Json(body)).into_response()
    }
}
