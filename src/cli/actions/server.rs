//! Server action: build the shared state and run the API.

use anyhow::Result;
use secrecy::SecretString;
use std::sync::Arc;

use crate::api;
use crate::api::handlers::user::{AuthConfig, AuthState, UserStore};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub session_secret: SecretString,
    pub secure_cookies: bool,
}

/// Execute the server action.
///
/// Both stores start empty; everything they accumulate is gone when the
/// process exits.
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let config = AuthConfig::new(args.session_secret).with_secure_cookies(args.secure_cookies);
    let state = Arc::new(AuthState::new(config, UserStore::new()));

    api::new(args.port, state).await
}
