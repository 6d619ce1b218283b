//! Run command handler
//!
//! Runs the configured sequence and turns its outcome into the exit code.

use anyhow::Result;
use relay_runner::service::TokioSleeper;
use relay_runner::{PollSettings, SequenceRunner};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::progress::ConsoleProgress;

/// Handle the run command
///
/// # Arguments
/// * `only` - Subset of pipeline names; empty means all
/// * `poll_interval` - Override of the configured interval, in seconds
/// * `max_polls` - Override of the configured poll bound
pub async fn handle_run_command(
    config: &Config,
    only: Vec<String>,
    poll_interval: Option<u64>,
    max_polls: Option<u32>,
) -> Result<ExitCode> {
    let mut runner_config = config.load_runner_config()?;
    if let Some(secs) = poll_interval {
        runner_config.poll_interval = Duration::from_secs(secs);
    }
    if max_polls.is_some() {
        runner_config.max_polls = max_polls;
    }
    runner_config.validate()?;

    let specs = runner_config.select(&only)?;
    let repository = config.repository(&runner_config)?;
    repository.prepare_for(&specs).await?;

    let settings = PollSettings::from(&runner_config);
    info!(
        "Organization {}, project {}, poll interval {:?}",
        runner_config.organization, runner_config.project, settings.interval
    );

    let runner = SequenceRunner::new(settings, Arc::new(repository), Arc::new(TokioSleeper))
        .with_progress(Arc::new(ConsoleProgress));

    let report = runner.run(&specs).await;

    Ok(ExitCode::from(report.exit_code()))
}
