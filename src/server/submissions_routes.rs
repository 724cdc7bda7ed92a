//! Demo submission routes: the public intake endpoint and the admin review
//! workflow.
//!
//! Reviewing a submission validates the status transition, then persists the
//! new status together with the matching notification outbox row in one
//! transaction. Delivery happens later in the outbox dispatcher, so a mail
//! provider outage can never fail the review request.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{post, put},
    Json, Router,
};
use serde::Deserialize;

use crate::label_store::{DemoSubmission, NewSubmission, PageRequest, SubmissionStatus};
use crate::mailer::templates;
use crate::mailer::EmailMessage;
use crate::server::error::{ApiError, ApiResult};
use crate::server::responses::Paginated;
use crate::server::session::AdminSession;
use crate::server::state::{GuardedLabelStore, ServerState};

#[derive(Debug, Deserialize)]
struct SubmissionListQuery {
    page: Option<u32>,
    limit: Option<u32>,
    status: Option<SubmissionStatus>,
}

#[derive(Debug, Deserialize)]
struct ReviewBody {
    pub status: SubmissionStatus,
    pub note: Option<String>,
    /// Custom acceptance message, embedded between the template greeting and
    /// signoff in place of the default body.
    pub message: Option<String>,
}

async fn create_submission(
    State(store): State<GuardedLabelStore>,
    Json(body): Json<NewSubmission>,
) -> ApiResult<impl IntoResponse> {
    let submission = store.create_submission(body)?;
    Ok((StatusCode::CREATED, Json(submission)))
}

async fn get_all_submissions(
    _admin: AdminSession,
    State(store): State<GuardedLabelStore>,
    Query(query): Query<SubmissionListQuery>,
) -> ApiResult<Json<Paginated<DemoSubmission>>> {
    let window = PageRequest::new(query.page.unwrap_or(1), query.limit.unwrap_or(10));
    let page = store.list_submissions(window, query.status)?;
    Ok(Json(Paginated::new(window, page)))
}

fn review_notification(
    submission: &DemoSubmission,
    status: SubmissionStatus,
    custom_message: Option<&str>,
) -> Option<EmailMessage> {
    let email = submission.email.as_deref()?;
    match status {
        SubmissionStatus::Rejected => Some(templates::rejection_email(email, &submission.artist_name)),
        SubmissionStatus::Accepted => Some(templates::acceptance_email(
            email,
            &submission.artist_name,
            custom_message,
        )),
        SubmissionStatus::Pending => None,
    }
}

async fn update_submission_status(
    _admin: AdminSession,
    State(store): State<GuardedLabelStore>,
    Path(id): Path<String>,
    Json(body): Json<ReviewBody>,
) -> ApiResult<Json<DemoSubmission>> {
    let submission = store
        .get_submission(&id)?
        .ok_or(ApiError::NotFound("submission"))?;

    if !submission.status.can_transition_to(body.status) {
        return Err(ApiError::InvalidTransition);
    }

    let notification = review_notification(&submission, body.status, body.message.as_deref());

    store
        .review_submission(&id, body.status, body.note.as_deref(), notification.as_ref())?
        .map(Json)
        .ok_or(ApiError::NotFound("submission"))
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", post(create_submission).get(get_all_submissions))
        .route("/{id}", put(update_submission_status))
        .with_state(state)
}
