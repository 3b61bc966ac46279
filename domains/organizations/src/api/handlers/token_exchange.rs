//! Token exchange handler
//!
//! Trades a verified external identity token for a session token that
//! downstream services accept.

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};
use tenantgate_auth::extract_bearer_token;
use tenantgate_common::{Error, Result};

use crate::api::middleware::OrganizationsState;

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Exchange an identity token for a session token
///
/// **POST /token-exchange**
///
/// A missing header or empty bearer token is a 400 here, unlike the
/// onboarding endpoints which answer 401.
pub async fn exchange_token(
    State(state): State<OrganizationsState>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::Validation("Authorization header is required".to_string()))?;

    let token = extract_bearer_token(header)
        .map_err(|_| Error::Validation("Bearer token is required".to_string()))?;

    let identity = state.auth.verify_identity(&token).await?;

    let user = state
        .repos
        .directory
        .find_app_user_by_email(&identity.email)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    let session = state
        .auth
        .sessions()
        .issue(user.id, &user.email, &identity.subject, &identity.name)?;

    tracing::info!(app_user_id = user.id, "Session token issued");

    Ok(Json(TokenResponse { token: session }))
}
