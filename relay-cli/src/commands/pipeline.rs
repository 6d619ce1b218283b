//! Pipeline command handlers
//!
//! Single-pipeline commands: trigger without waiting, inspect a run, and
//! list what is configured.

use anyhow::{Context, Result};
use colored::*;
use relay_core::domain::run::RunState;
use relay_core::dto::run::Run;
use relay_runner::repository::RunRepository;
use relay_runner::service::TokioSleeper;
use relay_runner::{PollSettings, SequenceRunner};
use std::process::ExitCode;
use std::sync::Arc;

use crate::config::Config;
use crate::progress::colorize_state;

/// Start one configured pipeline and print the run id
pub async fn trigger_pipeline(config: &Config, name: &str) -> Result<ExitCode> {
    let runner_config = config.load_runner_config()?;
    let spec = runner_config
        .find(name)
        .with_context(|| format!("pipeline '{}' is not configured", name))?
        .clone();
    let repository = config.repository(&runner_config)?;
    repository.prepare_for(std::slice::from_ref(&spec)).await?;

    let runner = SequenceRunner::new(
        PollSettings::from(&runner_config),
        Arc::new(repository),
        Arc::new(TokioSleeper),
    );

    match runner.trigger(&spec).await {
        Ok(handle) => {
            println!(
                "{} {} started run {}",
                "✓".green(),
                spec.name.bold(),
                handle.run_id.to_string().cyan()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("{} {}", "✗".red(), e.to_string().red());
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Fetch and print one run of a configured pipeline
pub async fn show_status(config: &Config, name: &str, run_id: u64) -> Result<ExitCode> {
    let runner_config = config.load_runner_config()?;
    let spec = runner_config
        .find(name)
        .with_context(|| format!("pipeline '{}' is not configured", name))?;
    let repository = config.repository(&runner_config)?;
    repository.prepare_for(std::slice::from_ref(spec)).await?;

    match repository.get_run(spec.id, run_id).await {
        Ok(run) => {
            print_run_details(&spec.name, &run);
            Ok(match run.run_state() {
                RunState::Completed(result) if !result.is_success() => ExitCode::FAILURE,
                _ => ExitCode::SUCCESS,
            })
        }
        Err(e) => {
            println!("{} {}", "✗".red(), format!("{:#}", e).red());
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Print the configured pipelines in execution order
pub fn list_pipelines(config: &Config) -> Result<ExitCode> {
    let runner_config = config.load_runner_config()?;

    if runner_config.pipelines.is_empty() {
        println!("{}", "No pipelines configured.".yellow());
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{}",
        format!(
            "{} pipeline(s) in {}/{}:",
            runner_config.pipelines.len(),
            runner_config.organization,
            runner_config.project
        )
        .bold()
    );
    println!();
    for (position, spec) in runner_config.pipelines.iter().enumerate() {
        println!(
            "  {}. {} {} {}",
            position + 1,
            spec.name.cyan(),
            format!("#{}", spec.id).dimmed(),
            spec.ref_name()
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Print detailed run information
fn print_run_details(pipeline: &str, run: &Run) {
    println!("{}", "Run Details:".bold());
    println!("  Pipeline:  {}", pipeline.cyan());
    println!("  Run ID:    {}", run.id);
    if let Some(name) = &run.name {
        println!("  Name:      {}", name);
    }
    println!("  State:     {}", colorize_state(&run.run_state()));

    if let Some(created) = run.created_date {
        println!("  Created:   {}", created.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(finished) = run.finished_date {
        println!("  Finished:  {}", finished.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(seconds) = run.duration_secs() {
        println!("  Duration:  {}s", seconds);
    }
    if let Some(url) = &run.url {
        println!("  URL:       {}", url.dimmed());
    }
}
