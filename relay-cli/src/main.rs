//! Relay CLI
//!
//! Triggers the configured pipelines one after another and waits for each
//! run to finish. Exits 0 when every run succeeded, 1 when the sequence
//! stopped on a failure, 2 when it could not start at all.

mod commands;
mod config;
mod progress;

use clap::Parser;
use colored::*;
use commands::{Commands, handle_command};
use config::Config;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exit code when configuration or credentials prevent any run from starting
const EXIT_SETUP_FAILURE: u8 = 2;

#[derive(Parser)]
#[command(name = "relay")]
#[command(about = "Run Azure DevOps pipelines one after another", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "RELAY_CONFIG", default_value = "relay.toml")]
    config: PathBuf,

    /// Environment variable holding the personal access token
    #[arg(long, default_value = "AZURE_DEVOPS_PAT")]
    pat_env: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so progress on stdout stays readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relay_cli=info,relay_runner=info,relay_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        config_path: cli.config,
        pat_env: cli.pat_env,
    };

    match handle_command(cli.command, &config).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "✗".red(), e);
            ExitCode::from(EXIT_SETUP_FAILURE)
        }
    }
}
