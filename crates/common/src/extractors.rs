//! Custom axum extractors for Tenantgate

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::Error;

/// JSON extractor whose rejections use the common error envelope.
///
/// axum's `Json<T>` answers 415/422 with a plain-text body; every input
/// problem here (missing content type, malformed JSON, wrong shape) is a 400.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

/// Rejection type for `JsonBody`
#[derive(Debug)]
pub struct JsonBodyRejection(JsonRejection);

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self.0.body_text(), "Rejected request body");
        Error::Validation("Invalid request body".to_string()).into_response()
    }
}

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(JsonBodyRejection)?;
        Ok(JsonBody(value))
    }
}
