//! Mock identity verifier
//!
//! Maps fixed token strings to identities, for tests and local development
//! without a live identity provider.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::claims::IdentityClaims;
use crate::error::AuthError;
use crate::verifier::IdentityVerifier;

/// In-memory verifier accepting only registered tokens
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityVerifier {
    tokens: Arc<RwLock<HashMap<String, IdentityClaims>>>,
}

impl StaticIdentityVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token that verifies to `claims`
    pub fn with_token(self, token: impl Into<String>, claims: IdentityClaims) -> Self {
        self.insert(token, claims);
        self
    }

    pub fn insert(&self, token: impl Into<String>, claims: IdentityClaims) {
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.insert(token.into(), claims);
        }
    }
}

#[async_trait::async_trait]
impl IdentityVerifier for StaticIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<IdentityClaims, AuthError> {
        let tokens = self.tokens.read().map_err(|_| AuthError::VerifierUnavailable)?;
        let claims = tokens.get(token).cloned().ok_or(AuthError::InvalidToken)?;

        if claims.email.is_empty() {
            return Err(AuthError::MissingEmail);
        }
        Ok(claims)
    }
}
