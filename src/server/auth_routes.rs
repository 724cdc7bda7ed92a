//! Authentication routes: signup, signin, signout.
//!
//! Tokens are stateless bearer JWTs; signout exists for API symmetry and the
//! client simply discards its token.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::server::error::{ApiError, ApiResult};
use crate::server::state::{GuardedLabelStore, ServerState};
use crate::user::{LabelHasher, TokenAuthority, User, UserRole};

#[derive(Debug, Deserialize)]
struct SignUpBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct SignInBody {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
struct SignUpResponse {
    message: String,
    user: User,
}

#[derive(Serialize)]
struct SignInResponse {
    message: String,
    token: String,
    user: User,
}

async fn sign_up(
    State(store): State<GuardedLabelStore>,
    Json(body): Json<SignUpBody>,
) -> ApiResult<impl IntoResponse> {
    if store.get_user_by_email(&body.email)?.is_some() {
        return Err(ApiError::Validation("User already exists".to_string()));
    }

    let password_hash = LabelHasher::Argon2.hash(&body.password)?;
    let user = store.create_user(&body.email, &password_hash, UserRole::User)?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            message: "User created successfully".to_string(),
            user,
        }),
    ))
}

async fn sign_in(
    State(store): State<GuardedLabelStore>,
    State(token_authority): State<TokenAuthority>,
    Json(body): Json<SignInBody>,
) -> ApiResult<Json<SignInResponse>> {
    debug!("sign_in() called for {}", body.email);
    let account = store
        .get_user_by_email(&body.email)?
        .ok_or(ApiError::InvalidCredentials)?;

    let valid = LabelHasher::Argon2.verify(body.password.as_str(), account.password_hash.as_str())?;
    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    let token = token_authority.issue(&account)?;

    Ok(Json(SignInResponse {
        message: "Login successful".to_string(),
        token,
        user: account.public(),
    }))
}

async fn sign_out() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Logout successful" }))
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/signin", post(sign_in))
        .route("/signout", post(sign_out))
        .with_state(state)
}
