//! Release routes. Create and update are composite writes spanning the
//! release row and its artist/genre association sets.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::label_store::{
    EntityKey, NewRelease, PageRequest, Release, ReleaseDetail, ReleasePatch,
};
use crate::server::error::{ApiError, ApiResult};
use crate::server::responses::{DeletedResponse, Paginated};
use crate::server::session::AdminSession;
use crate::server::state::{GuardedLabelStore, ServerState};

const FEATURED_LIMIT: usize = 4;

#[derive(Debug, Deserialize)]
struct ReleaseListQuery {
    page: Option<u32>,
    limit: Option<u32>,
    q: Option<String>,
    genre: Option<String>,
}

async fn get_featured_releases(
    State(store): State<GuardedLabelStore>,
) -> ApiResult<Json<Vec<ReleaseDetail>>> {
    Ok(Json(store.featured_releases(FEATURED_LIMIT)?))
}

async fn get_all_releases(
    State(store): State<GuardedLabelStore>,
    Query(query): Query<ReleaseListQuery>,
) -> ApiResult<Json<Paginated<ReleaseDetail>>> {
    let window = PageRequest::new(query.page.unwrap_or(1), query.limit.unwrap_or(10));
    let page = store.list_releases(window, query.q.as_deref(), query.genre.as_deref())?;
    Ok(Json(Paginated::new(window, page)))
}

async fn get_release(
    State(store): State<GuardedLabelStore>,
    Path(id_or_slug): Path<String>,
) -> ApiResult<Json<ReleaseDetail>> {
    let key = EntityKey::parse(id_or_slug);
    store
        .get_release(&key)?
        .map(Json)
        .ok_or(ApiError::NotFound("release"))
}

async fn create_release(
    _admin: AdminSession,
    State(store): State<GuardedLabelStore>,
    Json(body): Json<NewRelease>,
) -> ApiResult<impl IntoResponse> {
    let release = store.create_release(body)?;
    Ok((StatusCode::CREATED, Json(release)))
}

async fn update_release(
    _admin: AdminSession,
    State(store): State<GuardedLabelStore>,
    Path(id): Path<String>,
    Json(body): Json<ReleasePatch>,
) -> ApiResult<Json<Release>> {
    store
        .update_release(&id, body)?
        .map(Json)
        .ok_or(ApiError::NotFound("release"))
}

async fn delete_release(
    _admin: AdminSession,
    State(store): State<GuardedLabelStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    if store.delete_release(&id)? {
        Ok(Json(DeletedResponse::new("Release")))
    } else {
        Err(ApiError::NotFound("release"))
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/featured", get(get_featured_releases))
        .route("/", get(get_all_releases).post(create_release))
        .route(
            "/{id_or_slug}",
            get(get_release).put(update_release).delete(delete_release),
        )
        .with_state(state)
}
