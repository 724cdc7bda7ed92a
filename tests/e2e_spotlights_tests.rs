//! End-to-end tests for hero spotlight endpoints.

mod common;

use common::{seed_spotlight, TestClient, TestServer};
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn public_endpoint_returns_active_set_ordered_by_display_order() {
    let server = TestServer::spawn().await;
    seed_spotlight(server.store.as_ref(), "Second", true, 2);
    seed_spotlight(server.store.as_ref(), "First", true, 1);
    seed_spotlight(server.store.as_ref(), "Hidden", false, 0);

    let client = TestClient::new(server.base_url.clone());
    let response = client.get_active_spotlights().await;
    assert_eq!(response.status(), StatusCode::OK);

    let spotlights: Vec<serde_json::Value> = response.json().await.unwrap();
    // Several rows may be active at once; inactive rows are excluded
    assert_eq!(spotlights.len(), 2);
    assert_eq!(spotlights[0]["title"], "First");
    assert_eq!(spotlights[1]["title"], "Second");
}

#[tokio::test]
async fn admin_listing_includes_inactive_rows() {
    let server = TestServer::spawn().await;
    seed_spotlight(server.store.as_ref(), "Live", true, 0);
    seed_spotlight(server.store.as_ref(), "Draft", false, 1);

    let client = TestClient::new(server.base_url.clone());
    let spotlights: Vec<serde_json::Value> = client
        .get_all_spotlights()
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(spotlights.len(), 2);
}

#[tokio::test]
async fn create_applies_defaults() {
    let server = TestServer::spawn().await;
    let admin = TestClient::authenticated_admin(server.base_url.clone()).await;

    let response = admin
        .create_spotlight(json!({ "title": "Spring Campaign" }))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let spotlight: serde_json::Value = response.json().await.unwrap();
    assert_eq!(spotlight["is_active"], false);
    assert_eq!(spotlight["display_order"], 0);
}

#[tokio::test]
async fn update_can_activate_a_spotlight() {
    let server = TestServer::spawn().await;
    let spotlight = seed_spotlight(server.store.as_ref(), "Spring Campaign", false, 0);

    let admin = TestClient::authenticated_admin(server.base_url.clone()).await;
    let response = admin
        .update_spotlight(&spotlight.id, json!({ "is_active": true }))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let client = TestClient::new(server.base_url.clone());
    let active: Vec<serde_json::Value> = client
        .get_active_spotlights()
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["title"], "Spring Campaign");
}

#[tokio::test]
async fn delete_returns_204_then_404() {
    let server = TestServer::spawn().await;
    let spotlight = seed_spotlight(server.store.as_ref(), "Spring Campaign", false, 0);

    let admin = TestClient::authenticated_admin(server.base_url.clone()).await;
    let response = admin.delete_spotlight(&spotlight.id).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = admin.delete_spotlight(&spotlight.id).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn mutations_require_admin() {
    let server = TestServer::spawn().await;
    let user = TestClient::authenticated(server.base_url.clone()).await;

    let response = user
        .create_spotlight(json!({ "title": "Spring Campaign" }))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
