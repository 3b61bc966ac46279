//! Cross-origin policy for browser clients

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, ORIGIN},
    HeaderName, HeaderValue, Method,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

const X_REQUESTED_WITH: HeaderName = HeaderName::from_static("x-requested-with");
const X_APOLLO_TRACING: HeaderName = HeaderName::from_static("x-apollo-tracing");
const X_POSTGRAPHILE_EXPLAIN: HeaderName = HeaderName::from_static("x-postgraphile-explain");
const X_GRAPHQL_EVENT_STREAM: HeaderName = HeaderName::from_static("x-graphql-event-stream");

/// Parse a comma-separated origin list, skipping blanks and invalid values
pub fn parse_origins(allowed_origins: &str) -> Vec<HeaderValue> {
    allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}

/// CORS layer allowing only the configured origins
pub fn build_cors_layer(allowed_origins: &str) -> CorsLayer {
    let origins = parse_origins(allowed_origins);
    if origins.is_empty() {
        tracing::warn!("No CORS origins configured; cross-origin requests will be refused");
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::HEAD])
        .allow_headers([
            ORIGIN,
            X_REQUESTED_WITH,
            ACCEPT,
            AUTHORIZATION,
            CONTENT_TYPE,
            CONTENT_LENGTH,
            X_APOLLO_TRACING,
            X_POSTGRAPHILE_EXPLAIN,
        ])
        .expose_headers([X_GRAPHQL_EVENT_STREAM])
}
