//! Session token issuing and validation
//!
//! Session tokens are HS256 JWTs signed with the process-wide secret.
//! Expiry lives in the token itself; nothing is stored server-side.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::SessionClaims;
use crate::error::AuthError;

/// Lifetime of an issued session token
pub const SESSION_TTL_SECS: i64 = 60 * 60;

/// Audience expected by the GraphQL layer
pub const SESSION_AUDIENCE: &str = "postgraphile";

/// Issues and validates session tokens.
#[derive(Clone)]
pub struct SessionIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for SessionIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIssuer").finish_non_exhaustive()
    }
}

impl SessionIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a session token valid for `SESSION_TTL_SECS` from now
    pub fn issue(
        &self,
        user_id: i64,
        email: &str,
        subject: &str,
        name: &str,
    ) -> Result<String, AuthError> {
        self.issue_at(user_id, email, subject, name, Utc::now())
    }

    /// Issue a session token as of `issued_at`
    pub fn issue_at(
        &self,
        user_id: i64,
        email: &str,
        subject: &str,
        name: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let iat = issued_at.timestamp();
        let claims = SessionClaims {
            current_user: user_id,
            email: email.to_string(),
            sub: subject.to_string(),
            name: name.to_string(),
            aud: SESSION_AUDIENCE.to_string(),
            iat,
            exp: iat + SESSION_TTL_SECS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, user_id, "Failed to sign session token");
            AuthError::SigningFailed
        })
    }

    /// Validate signature, expiry, and audience of a session token
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[SESSION_AUDIENCE]);
        validation.leeway = 0;

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                tracing::debug!(error = %e, "Session token validation failed");
                AuthError::InvalidToken
            })?;

        Ok(token_data.claims)
    }
}
