use super::error::ApiError;
use super::state::ServerState;
use crate::user::UserRole;

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::debug;

pub const HEADER_SESSION_TOKEN_KEY: &str = "Authorization";

/// An authenticated caller, extracted from the bearer token.
#[derive(Debug)]
pub struct Session {
    pub user_id: String,
    pub email: String,
}

/// A session that additionally passed the admin policy check. The role is
/// read from the store on every request so a demotion takes effect
/// immediately, not at token expiry.
#[derive(Debug)]
pub struct AdminSession {
    pub session: Session,
}

fn extract_session_token_from_headers(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(HEADER_SESSION_TOKEN_KEY)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.strip_prefix("Bearer ").unwrap_or(v).to_string())
}

fn extract_session_from_request_parts(
    parts: &Parts,
    ctx: &ServerState,
) -> Result<Session, ApiError> {
    let token = match extract_session_token_from_headers(parts) {
        None => {
            debug!("No token in request headers.");
            return Err(ApiError::NoToken);
        }
        Some(token) => token,
    };

    let claims = match ctx.token_authority.verify(&token) {
        Ok(claims) => claims,
        Err(err) => {
            debug!("Token verification failed: {}", err);
            return Err(ApiError::Unauthorized);
        }
    };

    Ok(Session {
        user_id: claims.sub,
        email: claims.email,
    })
}

impl FromRequestParts<ServerState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        extract_session_from_request_parts(parts, ctx)
    }
}

impl FromRequestParts<ServerState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let session = extract_session_from_request_parts(parts, ctx)?;

        match ctx.label_store.get_user_role(&session.user_id)? {
            None => {
                debug!("No user row for id {}", session.user_id);
                Err(ApiError::UserNotFound)
            }
            Some(UserRole::Admin) => Ok(AdminSession { session }),
            Some(_) => Err(ApiError::AdminRequired),
        }
    }
}
