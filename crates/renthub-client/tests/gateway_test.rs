// Wire-level tests for the auth gateway
// Run with: cargo test -p renthub-client --test gateway_test

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use renthub_client::AuthGateway;
use renthub_core::{
    AuthError, LoginCredentials, PasswordChange, ProfileUpdate, RegisterInfo, UserRole,
};

#[tokio::test]
async fn test_login_sends_oauth2_password_form() {
    let server = MockServer::start().await;

    // The email travels in the `username` field, form-encoded
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username=a%40b.com"))
        .and(body_string_contains("password=hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "T1",
            "token_type": "bearer"
        })))
        .mount(&server)
        .await;

    let gateway = AuthGateway::new(&server.uri());
    let token = gateway
        .login(&LoginCredentials {
            email: "a@b.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(token, "T1");
}

#[tokio::test]
async fn test_register_posts_json_and_maps_422() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                {"loc": ["body", "email"], "msg": "value is not a valid email address", "type": "value_error.email"}
            ]
        })))
        .mount(&server)
        .await;

    let gateway = AuthGateway::new(&server.uri());
    let err = gateway
        .register(&RegisterInfo {
            full_name: "New User".to_string(),
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
            role: UserRole::Tenant,
            phone_number: None,
            profile_picture: None,
        })
        .await
        .unwrap_err();

    match err {
        AuthError::Validation(fields) => {
            assert_eq!(fields.len(), 1);
            assert_eq!(fields[0].field, "email");
            assert_eq!(fields[0].message, "value is not a valid email address");
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn test_current_user_attaches_bearer_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "email": "a@b.com",
            "full_name": "Abel Bekele",
            "role": "tenant"
        })))
        .mount(&server)
        .await;

    let gateway = AuthGateway::new(&server.uri());
    let user = gateway.current_user("T1").await.unwrap();
    assert_eq!(user.id, 1);
    assert_eq!(user.role, UserRole::Tenant);
}

#[tokio::test]
async fn test_update_profile_puts_partial_body() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer T1"))
        .and(body_string_contains("full_name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "email": "a@b.com",
            "full_name": "Renamed",
            "role": "tenant"
        })))
        .mount(&server)
        .await;

    let gateway = AuthGateway::new(&server.uri());
    let user = gateway
        .update_profile(
            "T1",
            &ProfileUpdate {
                full_name: Some("Renamed".to_string()),
                phone_number: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(user.full_name, "Renamed");
}

#[tokio::test]
async fn test_change_password_success_and_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/change-password"))
        .and(body_string_contains("old_password"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Password changed successfully"})),
        )
        .mount(&server)
        .await;

    let gateway = AuthGateway::new(&server.uri());
    let change = PasswordChange {
        old_password: "old".to_string(),
        new_password: "new".to_string(),
    };
    gateway.change_password("T1", &change).await.unwrap();

    // Wrong old password comes back as 400 with a detail string
    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/auth/change-password"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Incorrect old password"})),
        )
        .mount(&server)
        .await;

    let err = gateway.change_password("T1", &change).await.unwrap_err();
    assert!(matches!(err, AuthError::Authentication(ref m) if m == "Incorrect old password"));
}

#[tokio::test]
async fn test_connectivity_failure_is_a_network_error() {
    // Nothing listens on this port
    let gateway = AuthGateway::new("http://127.0.0.1:1");
    let err = gateway
        .login(&LoginCredentials {
            email: "a@b.com".to_string(),
            password: "x".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Network(_)));
}

#[tokio::test]
async fn test_google_login_url_is_built_not_fetched() {
    let gateway = AuthGateway::new("https://api.renthub.example");
    assert_eq!(
        gateway.google_login_url(),
        "https://api.renthub.example/auth/google"
    );
}
