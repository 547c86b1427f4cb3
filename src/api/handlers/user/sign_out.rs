//! Sign-out endpoint.

use axum::extract::Extension;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json};
use std::sync::Arc;
use tracing::error;

use super::cookie::clear_session_cookie;
use super::state::AuthState;
use super::types::UserResponse;

#[utoipa::path(
    get,
    path = "/user/sign-out",
    responses(
        (status = 200, description = "Session cookie cleared", body = UserResponse)
    ),
    tag = "user"
)]
pub async fn sign_out(state: Extension<Arc<AuthState>>) -> impl IntoResponse {
    // Clears the cookie only. The token's entry stays in the session store
    // for the lifetime of the process, so a replayed cookie still resolves.
    let mut headers = HeaderMap::new();
    match clear_session_cookie(state.config()) {
        Ok(cookie) => {
            headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => error!("Failed to build clearing cookie: {err}"),
    }

    (
        StatusCode::OK,
        headers,
        Json(UserResponse {
            success: true,
            message: "Signed out".to_string(),
        }),
    )
}
