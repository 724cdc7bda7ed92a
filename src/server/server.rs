use anyhow::Result;
use std::time::Duration;

use axum::{
    extract::State,
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::CorsLayer;

use super::state::*;
use super::{
    artists_routes, auth_routes, dashboard_routes, genres_routes, log_requests, releases_routes,
    spotlights_routes, submissions_routes, RequestsLoggingLevel, ServerConfig,
};
use crate::user::TokenAuthority;

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: env!("GIT_HASH").to_string(),
    };
    Json(stats)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub fn make_app(
    config: ServerConfig,
    label_store: GuardedLabelStore,
    token_authority: TokenAuthority,
) -> Result<Router> {
    let state = ServerState::new(config, label_store, token_authority);

    let app = Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .with_state(state.clone())
        .nest("/api/auth", auth_routes::router(state.clone()))
        .nest("/api/artists", artists_routes::router(state.clone()))
        .nest("/api/releases", releases_routes::router(state.clone()))
        .nest("/api/genres", genres_routes::router(state.clone()))
        .nest(
            "/api/demo-submission",
            submissions_routes::router(state.clone()),
        )
        .nest(
            "/api/hero-spotlights",
            spotlights_routes::router(state.clone()),
        )
        .nest("/api/dashboard", dashboard_routes::router(state.clone()))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn_with_state(state.clone(), log_requests));

    Ok(app)
}

pub async fn run_server(
    label_store: GuardedLabelStore,
    token_authority: TokenAuthority,
    requests_logging_level: RequestsLoggingLevel,
    port: u16,
) -> Result<()> {
    let config = ServerConfig {
        port,
        requests_logging_level,
    };
    let app = make_app(config, label_store, token_authority)?;

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}
