//! Spam sweeper CLI entrypoint for a single moderation pass.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use spam_sweeper::{ModerationError, SpamSweeperConfig};
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ModerationError> {
    let config = load_config()?;
    cli::moderate::run(&config).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ModerationError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<SpamSweeperConfig, ModerationError> {
    SpamSweeperConfig::load().map_err(|error| ModerationError::Configuration {
        message: error.to_string(),
    })
}

/// Logs to stderr, filtered by `RUST_LOG` (default `info`), so stdout carries
/// only the report.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
