//! Sign-up endpoint.

use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use std::sync::Arc;
use tracing::error;

use super::error::{auth_error_response, AuthError};
use super::password;
use super::state::AuthState;
use super::store::SignupOutcome;
use super::types::{validate_credentials, CredentialsRequest, UserResponse};

#[utoipa::path(
    put,
    path = "/user/sign-up",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid body or username already exists", body = UserResponse)
    ),
    tag = "user"
)]
pub async fn sign_up(
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

    // Fast-fail duplicates before paying for the hash; the store re-checks
    // under its lock when inserting.
    if state
        .store()
        .password_hash(&request.username)
        .await
        .is_some()
    {
        return auth_error_response(&AuthError::UsernameTaken).into_response();
    }

    let password = request.password.clone();
    let hash = match tokio::task::spawn_blocking(move || password::hash(&password)).await {
        Ok(Ok(hash)) => hash,
        Ok(Err(err)) => {
            error!("Failed to hash password: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
        Err(err) => {
            error!("Password hashing task failed: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match state.store().create_account(&request.username, hash).await {
        SignupOutcome::Created => (
            StatusCode::OK,
            Json(UserResponse {
                success: true,
                message: "User created".to_string(),
            }),
        )
            .into_response(),
        SignupOutcome::UsernameTaken => {
            auth_error_response(&AuthError::UsernameTaken).into_response()
        }
    }
}
