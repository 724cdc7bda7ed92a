//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all label-server endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::{Method, RequestBuilder, Response};
use serde_json::json;
use std::time::Duration;

/// HTTP test client carrying an optional bearer token
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
    /// Bearer token attached to every request when set
    pub token: Option<String>,
}

impl TestClient {
    /// Creates a new unauthenticated client
    ///
    /// Use this for the public endpoints and for testing auth flows.
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            base_url,
            token: None,
        }
    }

    /// Creates a client signed in as the seeded regular user
    ///
    /// # Panics
    ///
    /// Panics if authentication fails (indicates test infrastructure problem).
    pub async fn authenticated(base_url: String) -> Self {
        let mut client = Self::new(base_url);
        client.sign_in_as(TEST_USER_EMAIL, TEST_USER_PASS).await;
        client
    }

    /// Creates a client signed in as the seeded admin user
    ///
    /// # Panics
    ///
    /// Panics if authentication fails (indicates test infrastructure problem).
    pub async fn authenticated_admin(base_url: String) -> Self {
        let mut client = Self::new(base_url);
        client.sign_in_as(ADMIN_EMAIL, ADMIN_PASS).await;
        client
    }

    async fn sign_in_as(&mut self, email: &str, password: &str) {
        let response = self.sign_in(email, password).await;
        assert_eq!(
            response.status(),
            reqwest::StatusCode::OK,
            "Authentication failed for {}",
            email
        );
        let body: serde_json::Value = response.json().await.expect("Sign-in body not JSON");
        self.token = Some(
            body["token"]
                .as_str()
                .expect("Sign-in response missing token")
                .to_string(),
        );
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        builder
    }

    async fn send(builder: RequestBuilder) -> Response {
        builder.send().await.expect("Request failed")
    }

    // ========================================================================
    // System Endpoints
    // ========================================================================

    /// GET /health
    pub async fn health(&self) -> Response {
        Self::send(self.request(Method::GET, "/health")).await
    }

    // ========================================================================
    // Authentication Endpoints
    // ========================================================================

    /// POST /api/auth/signup
    pub async fn sign_up(&self, email: &str, password: &str) -> Response {
        Self::send(
            self.request(Method::POST, "/api/auth/signup")
                .json(&json!({ "email": email, "password": password })),
        )
        .await
    }

    /// POST /api/auth/signin
    pub async fn sign_in(&self, email: &str, password: &str) -> Response {
        Self::send(
            self.request(Method::POST, "/api/auth/signin")
                .json(&json!({ "email": email, "password": password })),
        )
        .await
    }

    /// POST /api/auth/signout
    pub async fn sign_out(&self) -> Response {
        Self::send(self.request(Method::POST, "/api/auth/signout")).await
    }

    // ========================================================================
    // Artist Endpoints
    // ========================================================================

    /// GET /api/artists with optional query parameters
    pub async fn get_artists(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
        q: Option<&str>,
    ) -> Response {
        let mut params = vec![];
        if let Some(page) = page {
            params.push(format!("page={}", page));
        }
        if let Some(limit) = limit {
            params.push(format!("limit={}", limit));
        }
        if let Some(q) = q {
            params.push(format!("q={}", q));
        }
        let mut path = "/api/artists".to_string();
        if !params.is_empty() {
            path = format!("{}?{}", path, params.join("&"));
        }
        Self::send(self.request(Method::GET, &path)).await
    }

    /// GET /api/artists/featured
    pub async fn get_featured_artists(&self) -> Response {
        Self::send(self.request(Method::GET, "/api/artists/featured")).await
    }

    /// GET /api/artists/{id_or_slug}
    pub async fn get_artist(&self, id_or_slug: &str) -> Response {
        Self::send(self.request(Method::GET, &format!("/api/artists/{}", id_or_slug))).await
    }

    /// POST /api/artists
    pub async fn create_artist(&self, body: serde_json::Value) -> Response {
        Self::send(self.request(Method::POST, "/api/artists").json(&body)).await
    }

    /// PUT /api/artists/{id}
    pub async fn update_artist(&self, id: &str, body: serde_json::Value) -> Response {
        Self::send(
            self.request(Method::PUT, &format!("/api/artists/{}", id))
                .json(&body),
        )
        .await
    }

    /// DELETE /api/artists/{id}
    pub async fn delete_artist(&self, id: &str) -> Response {
        Self::send(self.request(Method::DELETE, &format!("/api/artists/{}", id))).await
    }

    // ========================================================================
    // Release Endpoints
    // ========================================================================

    /// GET /api/releases with optional query parameters
    pub async fn get_releases(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
        q: Option<&str>,
        genre: Option<&str>,
    ) -> Response {
        let mut params = vec![];
        if let Some(page) = page {
            params.push(format!("page={}", page));
        }
        if let Some(limit) = limit {
            params.push(format!("limit={}", limit));
        }
        if let Some(q) = q {
            params.push(format!("q={}", q));
        }
        if let Some(genre) = genre {
            params.push(format!("genre={}", genre));
        }
        let mut path = "/api/releases".to_string();
        if !params.is_empty() {
            path = format!("{}?{}", path, params.join("&"));
        }
        Self::send(self.request(Method::GET, &path)).await
    }

    /// GET /api/releases/featured
    pub async fn get_featured_releases(&self) -> Response {
        Self::send(self.request(Method::GET, "/api/releases/featured")).await
    }

    /// GET /api/releases/{id_or_slug}
    pub async fn get_release(&self, id_or_slug: &str) -> Response {
        Self::send(self.request(Method::GET, &format!("/api/releases/{}", id_or_slug))).await
    }

    /// POST /api/releases
    pub async fn create_release(&self, body: serde_json::Value) -> Response {
        Self::send(self.request(Method::POST, "/api/releases").json(&body)).await
    }

    /// PUT /api/releases/{id}
    pub async fn update_release(&self, id: &str, body: serde_json::Value) -> Response {
        Self::send(
            self.request(Method::PUT, &format!("/api/releases/{}", id))
                .json(&body),
        )
        .await
    }

    /// DELETE /api/releases/{id}
    pub async fn delete_release(&self, id: &str) -> Response {
        Self::send(self.request(Method::DELETE, &format!("/api/releases/{}", id))).await
    }

    // ========================================================================
    // Genre Endpoints
    // ========================================================================

    /// GET /api/genres
    pub async fn get_genres(&self) -> Response {
        Self::send(self.request(Method::GET, "/api/genres")).await
    }

    /// POST /api/genres
    pub async fn create_genre(&self, body: serde_json::Value) -> Response {
        Self::send(self.request(Method::POST, "/api/genres").json(&body)).await
    }

    /// PUT /api/genres/{id}
    pub async fn update_genre(&self, id: &str, body: serde_json::Value) -> Response {
        Self::send(
            self.request(Method::PUT, &format!("/api/genres/{}", id))
                .json(&body),
        )
        .await
    }

    /// DELETE /api/genres/{id}
    pub async fn delete_genre(&self, id: &str) -> Response {
        Self::send(self.request(Method::DELETE, &format!("/api/genres/{}", id))).await
    }

    // ========================================================================
    // Demo Submission Endpoints
    // ========================================================================

    /// POST /api/demo-submission
    pub async fn create_submission(&self, body: serde_json::Value) -> Response {
        Self::send(self.request(Method::POST, "/api/demo-submission").json(&body)).await
    }

    /// GET /api/demo-submission with optional query parameters
    pub async fn get_submissions(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
        status: Option<&str>,
    ) -> Response {
        let mut params = vec![];
        if let Some(page) = page {
            params.push(format!("page={}", page));
        }
        if let Some(limit) = limit {
            params.push(format!("limit={}", limit));
        }
        if let Some(status) = status {
            params.push(format!("status={}", status));
        }
        let mut path = "/api/demo-submission".to_string();
        if !params.is_empty() {
            path = format!("{}?{}", path, params.join("&"));
        }
        Self::send(self.request(Method::GET, &path)).await
    }

    /// PUT /api/demo-submission/{id}
    pub async fn review_submission(&self, id: &str, body: serde_json::Value) -> Response {
        Self::send(
            self.request(Method::PUT, &format!("/api/demo-submission/{}", id))
                .json(&body),
        )
        .await
    }

    // ========================================================================
    // Hero Spotlight Endpoints
    // ========================================================================

    /// GET /api/hero-spotlights
    pub async fn get_active_spotlights(&self) -> Response {
        Self::send(self.request(Method::GET, "/api/hero-spotlights")).await
    }

    /// GET /api/hero-spotlights/all
    pub async fn get_all_spotlights(&self) -> Response {
        Self::send(self.request(Method::GET, "/api/hero-spotlights/all")).await
    }

    /// POST /api/hero-spotlights
    pub async fn create_spotlight(&self, body: serde_json::Value) -> Response {
        Self::send(self.request(Method::POST, "/api/hero-spotlights").json(&body)).await
    }

    /// PUT /api/hero-spotlights/{id}
    pub async fn update_spotlight(&self, id: &str, body: serde_json::Value) -> Response {
        Self::send(
            self.request(Method::PUT, &format!("/api/hero-spotlights/{}", id))
                .json(&body),
        )
        .await
    }

    /// DELETE /api/hero-spotlights/{id}
    pub async fn delete_spotlight(&self, id: &str) -> Response {
        Self::send(self.request(Method::DELETE, &format!("/api/hero-spotlights/{}", id))).await
    }

    // ========================================================================
    // Dashboard Endpoints
    // ========================================================================

    /// GET /api/dashboard/stats
    pub async fn get_dashboard_stats(&self) -> Response {
        Self::send(self.request(Method::GET, "/api/dashboard/stats")).await
    }
}
