//! Console progress output

use colored::*;
use relay_core::domain::pipeline::PipelineSpec;
use relay_core::domain::run::{RunHandle, RunState, TerminalResult};
use relay_runner::SequenceReport;
use relay_runner::service::ProgressSink;

/// Prints one line per trigger, poll tick and result
pub struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn sequence_started(&self, specs: &[PipelineSpec]) {
        if specs.is_empty() {
            println!("{}", "No pipelines to run.".yellow());
        } else {
            println!(
                "{}",
                format!("Running {} pipeline(s) in order:", specs.len()).bold()
            );
            println!();
        }
    }

    fn pipeline_triggered(&self, spec: &PipelineSpec, handle: &RunHandle) {
        println!(
            "  {} {} started run {}",
            "▸".cyan(),
            spec.name.bold(),
            handle.run_id.to_string().dimmed()
        );
    }

    fn poll_observed(
        &self,
        _spec: &PipelineSpec,
        _handle: &RunHandle,
        state: &RunState,
        attempt: u32,
    ) {
        if !state.is_terminal() {
            println!(
                "    {} poll {}: {}",
                "·".dimmed(),
                attempt,
                colorize_state(state)
            );
        }
    }

    fn pipeline_finished(
        &self,
        spec: &PipelineSpec,
        _handle: &RunHandle,
        result: &TerminalResult,
    ) {
        let mark = if result.is_success() {
            "✓".green()
        } else {
            "✗".red()
        };
        println!("    {} {}: {}", mark, spec.name, colorize_result(result));
        println!();
    }

    fn sequence_finished(&self, report: &SequenceReport) {
        if report.is_success() {
            println!(
                "{}",
                format!("✓ {} pipeline(s) succeeded", report.completed.len()).green()
            );
        } else {
            println!("{} {}", "✗".red(), report.outcome.to_string().red());
        }
    }
}

/// Colorize a run state for display
pub fn colorize_state(state: &RunState) -> ColoredString {
    match state {
        RunState::Queued => state.to_string().yellow(),
        RunState::InProgress => state.to_string().cyan(),
        RunState::Completed(result) => colorize_result(result),
    }
}

/// Colorize a terminal result for display
pub fn colorize_result(result: &TerminalResult) -> ColoredString {
    match result {
        TerminalResult::Succeeded => result.to_string().green(),
        TerminalResult::Failed => result.to_string().red(),
        TerminalResult::Canceled => result.to_string().dimmed(),
        TerminalResult::Other(_) => result.to_string().yellow(),
    }
}
