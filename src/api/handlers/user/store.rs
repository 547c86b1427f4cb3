//! In-memory credential and session stores.
//!
//! Both maps live for the lifetime of the process; nothing is persisted.
//! Every check-then-insert happens while the map's lock is held, so two
//! concurrent sign-ups for one username, or two sign-ins minting the same
//! token, can not interleave.

use anyhow::{Context, Result};
use rand::rngs::OsRng;
use rand::RngCore;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Outcome of a sign-up attempt against the credential store.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SignupOutcome {
    Created,
    UsernameTaken,
}

/// Process-memory account and session state.
///
/// Accounts map username to an Argon2id hash; sessions map a numeric token
/// to the username it authenticates as.
#[derive(Default)]
pub struct UserStore {
    credentials: Mutex<HashMap<String, String>>,
    sessions: Mutex<HashMap<u64, String>>,
}

impl UserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new account unless the username is already taken.
    pub(crate) async fn create_account(
        &self,
        username: &str,
        password_hash: String,
    ) -> SignupOutcome {
        let mut credentials = self.credentials.lock().await;
        if credentials.contains_key(username) {
            return SignupOutcome::UsernameTaken;
        }
        credentials.insert(username.to_string(), password_hash);
        SignupOutcome::Created
    }

    /// Stored password hash for a username, if the account exists.
    pub(crate) async fn password_hash(&self, username: &str) -> Option<String> {
        self.credentials.lock().await.get(username).cloned()
    }

    /// Mint a session token for a username and record the mapping.
    ///
    /// A token that is already live is redrawn, so an existing session is
    /// never silently handed to another user.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS RNG fails.
    pub(crate) async fn create_session(&self, username: &str) -> Result<u64> {
        let mut sessions = self.sessions.lock().await;
        loop {
            let token = random_token()?;
            if sessions.contains_key(&token) {
                continue;
            }
            sessions.insert(token, username.to_string());
            return Ok(token);
        }
    }

    /// Username a live session token resolves to, if any.
    pub(crate) async fn session_username(&self, token: u64) -> Option<String> {
        self.sessions.lock().await.get(&token).cloned()
    }
}

fn random_token() -> Result<u64> {
    let mut bytes = [0u8; 8];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate session token")?;
    Ok(u64::from_be_bytes(bytes))
}
