//! Admin dashboard aggregation.

use axum::{extract::State, routing::get, Json, Router};

use crate::label_store::DashboardStats;
use crate::server::error::ApiResult;
use crate::server::session::AdminSession;
use crate::server::state::{GuardedLabelStore, ServerState};

const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Independent count queries plus the five most recent submissions. Any
/// failing query fails the whole aggregation.
async fn get_dashboard_stats(
    _admin: AdminSession,
    State(store): State<GuardedLabelStore>,
) -> ApiResult<Json<DashboardStats>> {
    let releases = store.count_releases()?;
    let active_artists = store.count_active_artists()?;
    let pending_demos = store.count_pending_submissions()?;
    let active_spotlights = store.count_active_spotlights()?;
    let recent_activity = store.recent_submissions(RECENT_ACTIVITY_LIMIT)?;

    Ok(Json(DashboardStats {
        releases,
        active_artists,
        pending_demos,
        active_spotlights,
        recent_activity,
    }))
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/stats", get(get_dashboard_stats))
        .with_state(state)
}
