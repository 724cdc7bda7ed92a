//! End-to-end tests for authentication and the admin policy check.

mod common;

use common::{TestClient, TestServer, ADMIN_EMAIL, ADMIN_PASS, TEST_JWT_SECRET, TEST_USER_EMAIL};
use recursive_label_server::label_store::LabelStore;
use recursive_label_server::user::{TokenAuthority, UserAccount, UserRole};
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn signup_creates_regular_user() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.sign_up("new@recursive.example", "secret123").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["user"]["email"], "new@recursive.example");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"]["id"].as_str().is_some());
}

#[tokio::test]
async fn signup_with_taken_email_returns_400() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.sign_up(TEST_USER_EMAIL, "whatever").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn signin_returns_token_and_user() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.sign_in(ADMIN_EMAIL, ADMIN_PASS).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["token"].as_str().unwrap().len() > 20);
}

#[tokio::test]
async fn signin_with_wrong_password_returns_401() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.sign_in(ADMIN_EMAIL, "wrong-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn signin_with_unknown_email_returns_401() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.sign_in("ghost@recursive.example", "whatever").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn signout_is_stateless_ok() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.sign_out().await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Logout successful");
}

#[tokio::test]
async fn missing_token_on_admin_route_returns_403() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.get_dashboard_stats().await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "no token provided");
}

#[tokio::test]
async fn garbage_token_returns_401() {
    let server = TestServer::spawn().await;
    let mut client = TestClient::new(server.base_url.clone());
    client.token = Some("garbage".to_string());

    let response = client.get_dashboard_stats().await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn regular_user_is_denied_admin_routes() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone()).await;

    let response = client.get_dashboard_stats().await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "admin role required");
}

#[tokio::test]
async fn token_for_deleted_user_returns_404() {
    let server = TestServer::spawn().await;

    // Valid signature but no matching user row
    let authority = TokenAuthority::new(TEST_JWT_SECRET);
    let token = authority
        .issue(&UserAccount {
            id: "9f1b2c3d-4e5f-4a6b-8c7d-0123456789ab".to_string(),
            email: "ghost@recursive.example".to_string(),
            password_hash: String::new(),
            role: UserRole::Admin,
        })
        .unwrap();

    let mut client = TestClient::new(server.base_url.clone());
    client.token = Some(token);

    let response = client.get_dashboard_stats().await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "user not found");
}

#[tokio::test]
async fn bearer_prefix_is_optional() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.sign_in(ADMIN_EMAIL, ADMIN_PASS).await;
    let body: serde_json::Value = response.json().await.unwrap();
    let token = body["token"].as_str().unwrap();

    // Raw token in the Authorization header, no "Bearer " prefix
    let response = client
        .client
        .get(format!("{}/api/dashboard/stats", server.base_url))
        .header("Authorization", token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn admin_demotion_takes_effect_immediately() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated_admin(server.base_url.clone()).await;

    assert_eq!(
        client.get_dashboard_stats().await.status(),
        StatusCode::OK
    );

    // Demote while the token is still valid
    server
        .store
        .set_user_role(ADMIN_EMAIL, UserRole::User)
        .unwrap();

    let response = client.get_dashboard_stats().await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn signup_then_signin_round_trip() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    client
        .sign_up("roundtrip@recursive.example", "secret123")
        .await;
    let response = client
        .sign_in("roundtrip@recursive.example", "secret123")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.health().await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
}
