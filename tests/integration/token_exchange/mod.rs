//! POST /token-exchange integration tests

use axum::http::{Method, StatusCode};

use tenantgate_auth::SESSION_AUDIENCE;

use crate::common::{unique_email, TestApp};

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_session_token_carries_stored_user_id() {
    let app = TestApp::new().await.unwrap();
    let email = unique_email("exchange");
    let token = app.identity_token(&email);
    let (app_user_id, _) = app.insert_user(&email).await.unwrap();

    let (status, body) = app
        .request(Method::POST, "/token-exchange", Some(&token), None)
        .await
        .unwrap();

    assert_eq!(status, StatusCode::OK);
    let session = body["token"].as_str().unwrap();
    let claims = app.sessions.verify(session).unwrap();
    assert_eq!(claims.current_user, app_user_id);
    assert_eq!(claims.email, email);
    assert_eq!(claims.sub, format!("sub-{email}"));
    assert_eq!(claims.name, "Test User");
    assert_eq!(claims.aud, SESSION_AUDIENCE);
    assert_eq!(claims.exp - claims.iat, 3600);

    app.cleanup(&[&email]).await.unwrap();
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_unknown_user_is_not_found() {
    let app = TestApp::new().await.unwrap();
    let email = unique_email("nobody");
    let token = app.identity_token(&email);

    let (status, body) = app
        .request(Method::POST, "/token-exchange", Some(&token), None)
        .await
        .unwrap();

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "User not found");
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_provisioned_owner_can_exchange() {
    let app = TestApp::new().await.unwrap();
    let email = unique_email("owner");
    let token = app.identity_token(&email);

    let (status, created) = app
        .request(
            Method::POST,
            "/create-organization",
            Some(&token),
            Some(serde_json::json!({
                "organization": { "name": "Owner Org" },
                "appUser": { "email": email },
            })),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .request(Method::POST, "/token-exchange", Some(&token), None)
        .await
        .unwrap();

    assert_eq!(status, StatusCode::OK);
    let claims = app
        .sessions
        .verify(body["token"].as_str().unwrap())
        .unwrap();
    assert_eq!(Some(claims.current_user), created["user"]["id"].as_i64());

    app.cleanup(&[&email]).await.unwrap();
}
