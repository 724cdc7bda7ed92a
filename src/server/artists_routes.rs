//! Artist routes: public listing/detail plus admin mutations.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::label_store::{
    Artist, ArtistDetail, ArtistPatch, EntityKey, NewArtist, PageRequest,
};
use crate::server::error::{ApiError, ApiResult};
use crate::server::responses::{DeletedResponse, Paginated};
use crate::server::session::AdminSession;
use crate::server::state::{GuardedLabelStore, ServerState};

const FEATURED_LIMIT: usize = 4;

#[derive(Debug, Deserialize)]
struct ArtistListQuery {
    page: Option<u32>,
    limit: Option<u32>,
    q: Option<String>,
}

async fn get_featured_artists(
    State(store): State<GuardedLabelStore>,
) -> ApiResult<Json<Vec<Artist>>> {
    Ok(Json(store.featured_artists(FEATURED_LIMIT)?))
}

async fn get_all_artists(
    State(store): State<GuardedLabelStore>,
    Query(query): Query<ArtistListQuery>,
) -> ApiResult<Json<Paginated<Artist>>> {
    let window = PageRequest::new(query.page.unwrap_or(1), query.limit.unwrap_or(10));
    let page = store.list_artists(window, query.q.as_deref())?;
    Ok(Json(Paginated::new(window, page)))
}

async fn get_artist(
    State(store): State<GuardedLabelStore>,
    Path(id_or_slug): Path<String>,
) -> ApiResult<Json<ArtistDetail>> {
    let key = EntityKey::parse(id_or_slug);
    store
        .get_artist(&key)?
        .map(Json)
        .ok_or(ApiError::NotFound("artist"))
}

async fn create_artist(
    _admin: AdminSession,
    State(store): State<GuardedLabelStore>,
    Json(body): Json<NewArtist>,
) -> ApiResult<impl IntoResponse> {
    let artist = store.create_artist(body)?;
    Ok((StatusCode::CREATED, Json(artist)))
}

async fn update_artist(
    _admin: AdminSession,
    State(store): State<GuardedLabelStore>,
    Path(id): Path<String>,
    Json(body): Json<ArtistPatch>,
) -> ApiResult<Json<Artist>> {
    store
        .update_artist(&id, body)?
        .map(Json)
        .ok_or(ApiError::NotFound("artist"))
}

async fn delete_artist(
    _admin: AdminSession,
    State(store): State<GuardedLabelStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    if store.delete_artist(&id)? {
        Ok(Json(DeletedResponse::new("Artist")))
    } else {
        Err(ApiError::NotFound("artist"))
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/featured", get(get_featured_artists))
        .route("/", get(get_all_artists).post(create_artist))
        .route(
            "/{id_or_slug}",
            get(get_artist).put(update_artist).delete(delete_artist),
        )
        .with_state(state)
}
