//! Sign-in endpoint.

use axum::extract::Extension;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json};
use std::sync::Arc;
use tracing::error;

use super::cookie::session_cookie;
use super::error::{auth_error_response, AuthError};
use super::password;
use super::state::AuthState;
use super::types::{validate_credentials, CredentialsRequest, UserResponse};

#[utoipa::path(
    post,
    path = "/user/sign-in",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Signed in; session cookie set", body = UserResponse),
        (status = 400, description = "Invalid body", body = UserResponse),
        (status = 401, description = "Invalid username or password", body = UserResponse)
    ),
    tag = "user"
)]
pub async fn sign_in(
    state: Extension<Arc<AuthState>>,
    payload: Option<Json<CredentialsRequest>>,
) -> impl IntoResponse {
    let request = match payload {
        Some(Json(payload)) => payload,
        None => {
            return auth_error_response(&AuthError::InvalidBody("Missing payload")).into_response()
        }
    };

    if let Err(reason) = validate_credentials(&request) {
        return auth_error_response(&AuthError::InvalidBody(reason)).into_response();
    }

    // Whether the username is unknown or the password is wrong, the answer
    // is the same so accounts can not be enumerated.
    let Some(stored_hash) = state.store().password_hash(&request.username).await else {
        return auth_error_response(&AuthError::InvalidCredentials).into_response();
    };

    let password = request.password.clone();
    let verified =
        match tokio::task::spawn_blocking(move || password::verify(&password, &stored_hash)).await
        {
            Ok(verified) => verified,
            Err(err) => {
                error!("Password verification task failed: {err}");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };
    if !verified {
        return auth_error_response(&AuthError::InvalidCredentials).into_response();
    }

    // Any session cookie already on the request is ignored; the fresh token
    // replaces it client-side.
    let token = match state.store().create_session(&request.username).await {
        Ok(token) => token,
        Err(err) => {
            error!("Failed to create session: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let cookie = match session_cookie(state.config(), token) {
        Ok(cookie) => cookie,
        Err(err) => {
            error!("Failed to build session cookie: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    (
        StatusCode::OK,
        headers,
        Json(UserResponse {
            success: true,
            message: format!("Signed in as {}", request.username),
        }),
    )
        .into_response()
}
