//! Request/response types for the user endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Minimum password length accepted at sign-up and sign-in.
pub(super) const MIN_PASSWORD_CHARS: usize = 8;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UserResponse {
    pub success: bool,
    pub message: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ProfileResponse {
    pub success: bool,
    pub username: String,
}

/// Credential body rules shared by sign-up and sign-in.
///
/// Returns the failing rule so the response can name it.
pub(super) fn validate_credentials(body: &CredentialsRequest) -> Result<(), &'static str> {
    if body.username.is_empty() {
        return Err("Username must not be empty");
    }
    if body.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result};

    #[test]
    fn credentials_request_round_trips() -> Result<()> {
        let request = CredentialsRequest {
            username: "alice".to_string(),
            password: "longpass1".to_string(),
        };
        let value = serde_json::to_value(&request)?;
        let username = value
            .get("username")
            .and_then(serde_json::Value::as_str)
            .context("missing username")?;
        assert_eq!(username, "alice");
        let decoded: CredentialsRequest = serde_json::from_value(value)?;
        assert_eq!(decoded.password, "longpass1");
        Ok(())
    }

    #[test]
    fn profile_response_round_trips() -> Result<()> {
        let response = ProfileResponse {
            success: true,
            username: "alice".to_string(),
        };
        let value = serde_json::to_value(&response)?;
        let decoded: ProfileResponse = serde_json::from_value(value)?;
        assert!(decoded.success);
        assert_eq!(decoded.username, "alice");
        Ok(())
    }

    #[test]
    fn validate_credentials_accepts_minimal_valid_body() {
        let body = CredentialsRequest {
            username: "a".to_string(),
            password: "12345678".to_string(),
        };
        assert_eq!(validate_credentials(&body), Ok(()));
    }

    #[test]
    fn validate_credentials_rejects_empty_username() {
        let body = CredentialsRequest {
            username: String::new(),
            password: "longpass1".to_string(),
        };
        assert!(validate_credentials(&body).is_err());
    }

    #[test]
    fn validate_credentials_rejects_short_password() {
        let body = CredentialsRequest {
            username: "alice".to_string(),
            password: "short".to_string(),
        };
        assert!(validate_credentials(&body).is_err());
    }

    #[test]
    fn validate_credentials_counts_characters_not_bytes() {
        // Eight multibyte characters pass even though the byte count differs.
        let body = CredentialsRequest {
            username: "alice".to_string(),
            password: "ĉĝĥĵŝŭĉĝ".to_string(),
        };
        assert_eq!(validate_credentials(&body), Ok(()));
    }
}
