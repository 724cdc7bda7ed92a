//! Hero spotlight routes. Any number of spotlights may be active at once;
//! the public endpoint returns the active set ordered by display_order.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use crate::label_store::{HeroSpotlight, NewSpotlight, SpotlightPatch};
use crate::server::error::{ApiError, ApiResult};
use crate::server::session::AdminSession;
use crate::server::state::{GuardedLabelStore, ServerState};

async fn get_active_spotlights(
    State(store): State<GuardedLabelStore>,
) -> ApiResult<Json<Vec<HeroSpotlight>>> {
    Ok(Json(store.active_spotlights()?))
}

async fn get_all_spotlights(
    State(store): State<GuardedLabelStore>,
) -> ApiResult<Json<Vec<HeroSpotlight>>> {
    Ok(Json(store.list_spotlights()?))
}

async fn create_spotlight(
    _admin: AdminSession,
    State(store): State<GuardedLabelStore>,
    Json(body): Json<NewSpotlight>,
) -> ApiResult<impl IntoResponse> {
    let spotlight = store.create_spotlight(body)?;
    Ok((StatusCode::CREATED, Json(spotlight)))
}

async fn update_spotlight(
    _admin: AdminSession,
    State(store): State<GuardedLabelStore>,
    Path(id): Path<String>,
    Json(body): Json<SpotlightPatch>,
) -> ApiResult<Json<HeroSpotlight>> {
    store
        .update_spotlight(&id, body)?
        .map(Json)
        .ok_or(ApiError::NotFound("hero spotlight"))
}

async fn delete_spotlight(
    _admin: AdminSession,
    State(store): State<GuardedLabelStore>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    if store.delete_spotlight(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("hero spotlight"))
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/all", get(get_all_spotlights))
        .route("/", get(get_active_spotlights).post(create_spotlight))
        .route("/{id}", put(update_spotlight).delete(delete_spotlight))
        .with_state(state)
}
