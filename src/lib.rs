//! # Sesamo (User Sign-Up & Session Service)
//!
//! `sesamo` is a minimal user service: sign-up, sign-in, sign-out, and an
//! authenticated profile lookup. Accounts and sessions live in process
//! memory and last for the lifetime of the process.
//!
//! ## Accounts
//!
//! An account is a username mapped to an Argon2id password hash. Usernames
//! are unique; accounts are never updated or deleted once created.
//!
//! ## Sessions
//!
//! Signing in mints a random numeric token, stores `token -> username`, and
//! hands the token to the client inside an HMAC-signed cookie. Protected
//! routes resolve the cookie back to a username through the session gate.
//!
//! Signing out clears the cookie on the client. The server-side session
//! entry stays in the store, so a replayed token keeps resolving until the
//! process exits.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
