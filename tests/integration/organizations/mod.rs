//! Onboarding endpoint integration tests
//!
//! - GET /check-user-organization
//! - POST /create-organization

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use tenantgate_common::RepositoryError;
use tenantgate_organizations::{NewOrganization, ProvisioningService};

use crate::common::{unique_email, TestApp};

fn create_body(name: &str, email: &str) -> Value {
    json!({
        "organization": { "name": name, "description": "Integration test organization" },
        "appUser": { "email": email },
    })
}

mod test_check_user_organization {
    use super::*;

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_unknown_user_returns_nulls() {
        let app = TestApp::new().await.unwrap();
        let email = unique_email("check-unknown");
        let token = app.identity_token(&email);

        let (status, body) = app
            .request(Method::GET, "/check-user-organization", Some(&token), None)
            .await
            .unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"appUserId": null, "organizationId": null}));
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_existing_user_returns_ids() {
        let app = TestApp::new().await.unwrap();
        let email = unique_email("check-known");
        let token = app.identity_token(&email);
        let (app_user_id, organization_id) = app.insert_user(&email).await.unwrap();

        let (status, body) = app
            .request(Method::GET, "/check-user-organization", Some(&token), None)
            .await
            .unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["appUserId"], app_user_id);
        assert_eq!(body["organizationId"], organization_id);

        app.cleanup(&[&email]).await.unwrap();
    }
}

mod test_create_organization {
    use super::*;

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_new_user_becomes_owner() {
        let app = TestApp::new().await.unwrap();
        let email = unique_email("acme");
        let token = app.identity_token(&email);

        let (status, body) = app
            .request(
                Method::POST,
                "/create-organization",
                Some(&token),
                Some(json!({
                    "organization": { "name": "Acme" },
                    "appUser": { "email": email },
                })),
            )
            .await
            .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["organization"]["name"], "Acme");
        assert_eq!(body["user"]["role"], "owner");
        assert_eq!(body["user"]["email"], email.as_str());
        assert_eq!(body["user"]["organizationId"], body["organization"]["id"]);
        assert_eq!(app.count_users(&email).await.unwrap(), 1);

        app.cleanup(&[&email]).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_second_create_returns_existing_ids() {
        let app = TestApp::new().await.unwrap();
        let email = unique_email("repeat");
        let token = app.identity_token(&email);
        let name = format!("Repeat {email}");

        let (status, first) = app
            .request(
                Method::POST,
                "/create-organization",
                Some(&token),
                Some(create_body(&name, &email)),
            )
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let (status, second) = app
            .request(
                Method::POST,
                "/create-organization",
                Some(&token),
                Some(create_body(&name, &email)),
            )
            .await
            .unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(second["error"]["code"], "ALREADY_EXISTS");
        assert_eq!(second["appUserId"], first["user"]["id"]);
        assert_eq!(second["organizationId"], first["organization"]["id"]);
        assert_eq!(app.count_organizations_named(&name).await.unwrap(), 1);
        assert_eq!(app.count_users(&email).await.unwrap(), 1);

        app.cleanup(&[&email]).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_existing_user_wins_over_invalid_body() {
        let app = TestApp::new().await.unwrap();
        let email = unique_email("existing");
        let token = app.identity_token(&email);
        let (app_user_id, _) = app.insert_user(&email).await.unwrap();

        let (status, body) = app
            .request(
                Method::POST,
                "/create-organization",
                Some(&token),
                Some(json!({})),
            )
            .await
            .unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["appUserId"], app_user_id);

        app.cleanup(&[&email]).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_email_mismatch_writes_nothing() {
        let app = TestApp::new().await.unwrap();
        let email = unique_email("caller");
        let other = unique_email("other");
        let token = app.identity_token(&email);
        let name = format!("Mismatch {email}");

        let (status, body) = app
            .request(
                Method::POST,
                "/create-organization",
                Some(&token),
                Some(create_body(&name, &other)),
            )
            .await
            .unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Email mismatch between token and request"
        );
        assert_eq!(app.count_users(&email).await.unwrap(), 0);
        assert_eq!(app.count_users(&other).await.unwrap(), 0);
        assert_eq!(app.count_organizations_named(&name).await.unwrap(), 0);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_missing_name_writes_nothing() {
        let app = TestApp::new().await.unwrap();
        let email = unique_email("noname");
        let token = app.identity_token(&email);

        let (status, _) = app
            .request(
                Method::POST,
                "/create-organization",
                Some(&token),
                Some(json!({ "appUser": { "email": email } })),
            )
            .await
            .unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(app.count_users(&email).await.unwrap(), 0);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_concurrent_creates_yield_one_owner() {
        let app = TestApp::new().await.unwrap();
        let email = unique_email("race");
        let token = app.identity_token(&email);
        let name = format!("Race {email}");

        let (a, b) = tokio::join!(
            app.request(
                Method::POST,
                "/create-organization",
                Some(&token),
                Some(create_body(&name, &email)),
            ),
            app.request(
                Method::POST,
                "/create-organization",
                Some(&token),
                Some(create_body(&name, &email)),
            ),
        );
        let mut statuses = vec![a.unwrap().0, b.unwrap().0];
        statuses.sort();

        assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::BAD_REQUEST]);
        assert_eq!(app.count_users(&email).await.unwrap(), 1);
        assert_eq!(app.count_organizations_named(&name).await.unwrap(), 1);

        app.cleanup(&[&email]).await.unwrap();
    }
}

mod test_atomicity {
    use super::*;

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_failed_owner_insert_rolls_back_organization() {
        let app = TestApp::new().await.unwrap();
        let email = unique_email("atomic");
        app.insert_user(&email).await.unwrap();
        let name = format!("Atomic {email}");

        // The organization insert succeeds; the owner insert hits the unique email
        let result = ProvisioningService::new(&app.repos)
            .create_with_owner(&NewOrganization {
                name: name.clone(),
                description: None,
                owner_email: email.clone(),
            })
            .await;

        assert!(matches!(result, Err(RepositoryError::AlreadyExists)));
        assert_eq!(app.count_organizations_named(&name).await.unwrap(), 0);
        assert_eq!(app.count_users(&email).await.unwrap(), 1);

        app.cleanup(&[&email]).await.unwrap();
    }
}
