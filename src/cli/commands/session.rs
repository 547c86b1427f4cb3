use clap::{Arg, ArgAction, Command};

pub const ARG_SESSION_SECRET: &str = "session-secret";
pub const ARG_SECURE_COOKIES: &str = "secure-cookies";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SESSION_SECRET)
                .short('s')
                .long("session-secret")
                .help("Shared secret used to sign session cookies")
                .env("SESAMO_SESSION_SECRET")
                .required(true),
        )
        .arg(
            Arg::new(ARG_SECURE_COOKIES)
                .long("secure-cookies")
                .help("Mark session cookies Secure so browsers only send them over HTTPS")
                .env("SESAMO_SECURE_COOKIES")
                .action(ArgAction::SetTrue),
        )
}
