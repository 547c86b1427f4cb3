use anyhow::Result;
use sesamo::cli::{self, actions::Action, telemetry};

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    let action = cli::start()?;

    let result = match action {
        Action::Server(args) => cli::actions::server::execute(args).await,
    };

    telemetry::shutdown_tracer();

    result
}
