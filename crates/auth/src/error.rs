//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    MissingAuthorization,
    InvalidAuthorizationFormat,
    InvalidToken,
    /// Token verified but carried no usable email
    MissingEmail,
    /// Signing keys of the identity provider could not be retrieved
    VerifierUnavailable,
    SigningFailed,
}

impl AuthError {
    fn parts(&self) -> (StatusCode, &'static str, &'static str) {
        match self {
            AuthError::MissingAuthorization => (
                StatusCode::UNAUTHORIZED,
                "MISSING_AUTHORIZATION",
                "Authentication required",
            ),
            AuthError::InvalidAuthorizationFormat => (
                StatusCode::UNAUTHORIZED,
                "INVALID_AUTHORIZATION",
                "Invalid authorization header format",
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Invalid or expired token",
            ),
            AuthError::MissingEmail => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Token does not carry a verified email",
            ),
            AuthError::VerifierUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AUTH_ERROR",
                "Internal server error",
            ),
            AuthError::SigningFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AUTH_ERROR",
                "Internal server error",
            ),
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::VerifierUnavailable => write!(f, "Identity provider keys unavailable"),
            AuthError::SigningFailed => write!(f, "Failed to sign session token"),
            other => write!(f, "{}", other.parts().2),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<AuthError> for tenantgate_common::Error {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::VerifierUnavailable | AuthError::SigningFailed => {
                tenantgate_common::Error::Internal(err.to_string())
            }
            other => tenantgate_common::Error::Authentication(other.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Authentication failure");
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
