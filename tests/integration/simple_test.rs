//! Simple integration test to verify basic infrastructure works

#[tokio::test]
async fn test_config_loading() {
    use crate::common::TestConfig;

    let config = TestConfig::from_env();
    assert!(!config.database_url.is_empty());
    assert!(!config.jwt_secret.is_empty());
}

#[test]
fn test_unique_emails_differ() {
    let a = crate::common::unique_email("simple");
    let b = crate::common::unique_email("simple");
    assert_ne!(a, b);
}

#[allow(dead_code)]
mod common;
