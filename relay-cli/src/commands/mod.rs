//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod pipeline;
mod run;

use anyhow::Result;
use clap::Subcommand;
use std::process::ExitCode;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the configured pipelines one after another
    Run {
        /// Only run these pipelines (comma-separated), keeping configured order
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,

        /// Seconds between two status queries of the same run
        #[arg(long)]
        poll_interval: Option<u64>,

        /// Give up on a run after this many status queries
        #[arg(long)]
        max_polls: Option<u32>,
    },
    /// Start one configured pipeline without waiting for it
    Trigger {
        /// Pipeline name from the configuration file
        name: String,
    },
    /// Show the state of a run
    Status {
        /// Pipeline name from the configuration file
        name: String,

        /// Run id
        run_id: u64,
    },
    /// List the configured pipelines in execution order
    List,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Returns
/// The process exit code, or an error when the command could not get going
pub async fn handle_command(command: Commands, config: &Config) -> Result<ExitCode> {
    match command {
        Commands::Run {
            only,
            poll_interval,
            max_polls,
        } => run::handle_run_command(config, only, poll_interval, max_polls).await,
        Commands::Trigger { name } => pipeline::trigger_pipeline(config, &name).await,
        Commands::Status { name, run_id } => pipeline::show_status(config, &name, run_id).await,
        Commands::List => pipeline::list_pipelines(config),
    }
}
