//! kb-console: terminal admin console for the knowledge-base platform
//!
//! One invocation mounts one view. Session, permission cache and
//! preferences persist in the storage directory between runs.

mod cli;
mod commands;
mod logging;
mod render;

use std::process::ExitCode;

use clap::Parser;
use kb_client::{ClientConfig, ClientError, KbClient};

use cli::Cli;
use commands::Console;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let _guard = match logging::init(cli.log_dir.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            None
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            let message = match e.downcast_ref::<ClientError>() {
                Some(client_error) => client_error.user_message(),
                None => format!("{e:#}"),
            };
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ClientConfig::new(cli.api_url)
        .with_timeout(cli.timeout)
        .with_storage_dir(cli.storage_dir);
    tracing::debug!(base_url = %config.base_url, "Using API");

    let console = Console {
        client: KbClient::new(config)?,
        json: cli.json,
    };
    commands::run(&console, cli.command).await
}
