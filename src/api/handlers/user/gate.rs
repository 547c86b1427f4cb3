//! Authentication gate for protected routes.
//!
//! Flow Overview: read the signed session cookie, resolve it to a username,
//! and expose the result to the downstream handler. Requests without a live
//! session are rejected before the handler runs.

use axum::extract::{Extension, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use super::cookie::extract_session_token;
use super::error::{auth_error_response, AuthError};
use super::state::AuthState;

/// Authenticated user context derived from the session cookie.
#[derive(Clone, Debug)]
pub struct SessionUser {
    pub token: u64,
    pub username: String,
}

/// Resolve the session cookie into a [`SessionUser`], or reject.
pub(super) async fn require_session(
    headers: &axum::http::HeaderMap,
    state: &AuthState,
) -> Result<SessionUser, AuthError> {
    let Some(token) = extract_session_token(headers, state.config().session_secret()) else {
        return Err(AuthError::Unauthorized);
    };
    match state.store().session_username(token).await {
        Some(username) => Ok(SessionUser { token, username }),
        None => Err(AuthError::Unauthorized),
    }
}

/// Middleware guarding protected routes.
///
/// On success the resolved [`SessionUser`] is inserted as a request
/// extension for the handler.
pub async fn session_gate(
    state: Extension<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    match require_session(request.headers(), &state).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => auth_error_response(&err).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::{require_session, SessionUser};
    use crate::api::handlers::user::cookie::session_cookie;
    use crate::api::handlers::user::error::AuthError;
    use crate::api::handlers::user::{AuthConfig, AuthState, UserStore};
    use anyhow::{Context, Result};
    use axum::http::header::COOKIE;
    use axum::http::{HeaderMap, HeaderValue};
    use secrecy::SecretString;

    fn state() -> AuthState {
        AuthState::new(AuthConfig::new(SecretString::from("seia")), UserStore::new())
    }

    fn replay_headers(set_cookie: &HeaderValue) -> Result<HeaderMap> {
        let pair = set_cookie
            .to_str()?
            .split(';')
            .next()
            .context("empty cookie")?
            .to_string();
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(&pair)?);
        Ok(headers)
    }

    #[tokio::test]
    async fn missing_cookie_is_unauthorized() {
        let state = state();
        let err = require_session(&HeaderMap::new(), &state).await.err();
        assert_eq!(err, Some(AuthError::Unauthorized));
    }

    #[tokio::test]
    async fn signed_but_unknown_token_is_unauthorized() -> Result<()> {
        let state = state();
        // Correctly signed cookie for a token the store never issued.
        let set_cookie = session_cookie(state.config(), 42)?;
        let headers = replay_headers(&set_cookie)?;
        let err = require_session(&headers, &state).await.err();
        assert_eq!(err, Some(AuthError::Unauthorized));
        Ok(())
    }

    #[tokio::test]
    async fn live_token_resolves_to_session_user() -> Result<()> {
        let state = state();
        let token = state.store().create_session("alice").await?;
        let set_cookie = session_cookie(state.config(), token)?;
        let headers = replay_headers(&set_cookie)?;

        let SessionUser {
            token: resolved,
            username,
        } = require_session(&headers, &state)
            .await
            .map_err(|err| anyhow::anyhow!("expected session, got {err:?}"))?;
        assert_eq!(resolved, token);
        assert_eq!(username, "alice");
        Ok(())
    }
}
