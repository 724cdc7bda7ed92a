//! Genre routes: flat reference listing plus admin mutations.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use crate::label_store::{Genre, GenrePatch, NewGenre};
use crate::server::error::{ApiError, ApiResult};
use crate::server::responses::DeletedResponse;
use crate::server::session::AdminSession;
use crate::server::state::{GuardedLabelStore, ServerState};

async fn get_all_genres(State(store): State<GuardedLabelStore>) -> ApiResult<Json<Vec<Genre>>> {
    Ok(Json(store.list_genres()?))
}

async fn create_genre(
    _admin: AdminSession,
    State(store): State<GuardedLabelStore>,
    Json(body): Json<NewGenre>,
) -> ApiResult<impl IntoResponse> {
    let genre = store.create_genre(body)?;
    Ok((StatusCode::CREATED, Json(genre)))
}

async fn update_genre(
    _admin: AdminSession,
    State(store): State<GuardedLabelStore>,
    Path(id): Path<String>,
    Json(body): Json<GenrePatch>,
) -> ApiResult<Json<Genre>> {
    store
        .update_genre(&id, body)?
        .map(Json)
        .ok_or(ApiError::NotFound("genre"))
}

async fn delete_genre(
    _admin: AdminSession,
    State(store): State<GuardedLabelStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    if store.delete_genre(&id)? {
        Ok(Json(DeletedResponse::new("Genre")))
    } else {
        Err(ApiError::NotFound("genre"))
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(get_all_genres).post(create_genre))
        .route("/{id}", put(update_genre).delete(delete_genre))
        .with_state(state)
}
