//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action the binary executes.

use anyhow::{Context, Result};
use secrecy::SecretString;

use crate::cli::actions::server::Args;
use crate::cli::actions::Action;
use crate::cli::commands::session;

/// Map validated CLI matches to a server action.
///
/// # Errors
///
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(3000);

    let session_secret = matches
        .get_one::<String>(session::ARG_SESSION_SECRET)
        .cloned()
        .context("missing required argument: --session-secret")?;

    let secure_cookies = matches.get_flag(session::ARG_SECURE_COOKIES);

    Ok(Action::Server(Args {
        port,
        session_secret: SecretString::from(session_secret),
        secure_cookies,
    }))
}
