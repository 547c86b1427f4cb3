//! Error taxonomy for the user endpoints.

use axum::http::StatusCode;
use axum::response::Json;

use super::types::UserResponse;

/// Failures a user endpoint can answer with.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum AuthError {
    /// Request body missing or failing validation.
    InvalidBody(&'static str),
    /// Sign-up username is already registered.
    UsernameTaken,
    /// Sign-in credentials do not match an account.
    InvalidCredentials,
    /// Missing or unknown session token on a protected route.
    Unauthorized,
}

pub(super) fn auth_error_response(err: &AuthError) -> (StatusCode, Json<UserResponse>) {
    let (status, message) = match err {
        AuthError::InvalidBody(reason) => (StatusCode::BAD_REQUEST, (*reason).to_string()),
        AuthError::UsernameTaken => (
            StatusCode::BAD_REQUEST,
            "Username already exists".to_string(),
        ),
        AuthError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            "Invalid username or password".to_string(),
        ),
        AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
    };
    (
        status,
        Json(UserResponse {
            success: false,
            message,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::{auth_error_response, AuthError};
    use axum::http::StatusCode;

    #[test]
    fn conflict_maps_to_bad_request() {
        let (status, body) = auth_error_response(&AuthError::UsernameTaken);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
        assert_eq!(body.message, "Username already exists");
    }

    #[test]
    fn credential_failures_map_to_unauthorized() {
        let (status, body) = auth_error_response(&AuthError::InvalidCredentials);
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.message, "Invalid username or password");

        let (status, body) = auth_error_response(&AuthError::Unauthorized);
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.message, "Unauthorized");
    }

    #[test]
    fn invalid_body_carries_its_reason() {
        let (status, body) = auth_error_response(&AuthError::InvalidBody("Missing payload"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "Missing payload");
    }
}
