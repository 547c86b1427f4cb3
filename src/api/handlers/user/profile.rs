//! Authenticated profile lookup.

use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use std::sync::Arc;

use super::error::{auth_error_response, AuthError};
use super::gate::SessionUser;
use super::state::AuthState;
use super::types::{ProfileResponse, UserResponse};

#[utoipa::path(
    get,
    path = "/user/profile",
    responses(
        (status = 200, description = "Username for the active session", body = ProfileResponse),
        (status = 401, description = "Missing or unknown session token", body = UserResponse)
    ),
    tag = "user"
)]
pub async fn profile(
    state: Extension<Arc<AuthState>>,
    user: Extension<SessionUser>,
) -> impl IntoResponse {
    // The gate already resolved the cookie; look the token up again so a
    // session gone mid-request still answers 401.
    match state.store().session_username(user.token).await {
        Some(username) => (
            StatusCode::OK,
            Json(ProfileResponse {
                success: true,
                username,
            }),
        )
            .into_response(),
        None => auth_error_response(&AuthError::Unauthorized).into_response(),
    }
}
