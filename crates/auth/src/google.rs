//! Google ID token verification
//!
//! Validates RS256 ID tokens against Google's published JWKS. Keys are
//! cached for an hour and refetched when a token names an unknown `kid`.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, error};

use crate::claims::{GoogleIdTokenClaims, IdentityClaims};
use crate::error::AuthError;
use crate::verifier::IdentityVerifier;

const GOOGLE_JWKS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";
const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];
const JWKS_CACHE_TTL_MINUTES: i64 = 60;

#[derive(Debug, Clone, Deserialize)]
struct GoogleKey {
    kid: String,
    n: String,
    e: String,
}

#[derive(Deserialize)]
struct JwksResponse {
    keys: Vec<GoogleKey>,
}

#[derive(Default)]
struct JwksCache {
    keys: HashMap<String, GoogleKey>,
    fetched_at: Option<DateTime<Utc>>,
}

impl JwksCache {
    fn is_fresh(&self) -> bool {
        self.fetched_at
            .map(|at| Utc::now() - at <= Duration::minutes(JWKS_CACHE_TTL_MINUTES))
            .unwrap_or(false)
    }
}

/// Verifies Google-issued ID tokens for a single OAuth client ID.
#[derive(Clone)]
pub struct GoogleIdentityVerifier {
    http_client: Client,
    audience: String,
    jwks_url: String,
    cache: Arc<RwLock<JwksCache>>,
}

impl GoogleIdentityVerifier {
    pub fn new(audience: impl Into<String>) -> Self {
        Self::with_jwks_url(audience, GOOGLE_JWKS_URL)
    }

    pub fn with_jwks_url(audience: impl Into<String>, jwks_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            audience: audience.into(),
            jwks_url: jwks_url.into(),
            cache: Arc::new(RwLock::new(JwksCache::default())),
        }
    }

    async fn key_for_kid(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        {
            let cache = self.cache.read().await;
            if cache.is_fresh() {
                if let Some(key) = cache.keys.get(kid) {
                    return to_decoding_key(key);
                }
            }
        }

        debug!(kid, "Refreshing Google JWKS cache");
        self.refresh_keys().await?;

        let cache = self.cache.read().await;
        let key = cache.keys.get(kid).ok_or_else(|| {
            debug!(kid, "Key ID not present in Google JWKS");
            AuthError::InvalidToken
        })?;
        to_decoding_key(key)
    }

    async fn refresh_keys(&self) -> Result<(), AuthError> {
        let response = self
            .http_client
            .get(&self.jwks_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                error!(error = %e, url = %self.jwks_url, "Failed to fetch Google JWKS");
                AuthError::VerifierUnavailable
            })?;

        let jwks: JwksResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse Google JWKS");
            AuthError::VerifierUnavailable
        })?;

        let mut cache = self.cache.write().await;
        cache.keys = jwks.keys.into_iter().map(|k| (k.kid.clone(), k)).collect();
        cache.fetched_at = Some(Utc::now());
        debug!(key_count = cache.keys.len(), "Google JWKS cache refreshed");
        Ok(())
    }
}

fn to_decoding_key(key: &GoogleKey) -> Result<DecodingKey, AuthError> {
    DecodingKey::from_rsa_components(&key.n, &key.e).map_err(|e| {
        error!(error = %e, kid = %key.kid, "Invalid RSA components in Google JWKS");
        AuthError::VerifierUnavailable
    })
}

/// Normalize verified Google claims, rejecting tokens without a usable email
pub(crate) fn identity_from_google(
    claims: GoogleIdTokenClaims,
) -> Result<IdentityClaims, AuthError> {
    if claims.email_verified == Some(false) {
        return Err(AuthError::MissingEmail);
    }

    let email = claims
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .ok_or(AuthError::MissingEmail)?;

    Ok(IdentityClaims {
        subject: claims.sub,
        email,
        name: claims.name.unwrap_or_default(),
    })
}

#[async_trait::async_trait]
impl IdentityVerifier for GoogleIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<IdentityClaims, AuthError> {
        let header = decode_header(token).map_err(|e| {
            debug!(error = %e, "Failed to decode ID token header");
            AuthError::InvalidToken
        })?;

        if header.alg != Algorithm::RS256 {
            return Err(AuthError::InvalidToken);
        }
        let kid = header.kid.ok_or(AuthError::InvalidToken)?;

        let decoding_key = self.key_for_kid(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.audience.as_str()]);
        validation.set_issuer(&GOOGLE_ISSUERS[..]);
        validation.set_required_spec_claims(&["iss", "sub", "aud", "exp"]);

        let token_data =
            decode::<GoogleIdTokenClaims>(token, &decoding_key, &validation).map_err(|e| {
                debug!(error = %e, "ID token verification failed");
                AuthError::InvalidToken
            })?;

        identity_from_google(token_data.claims)
    }
}
