//! Sequence results

use relay_core::domain::run::TerminalResult;

use super::error::{PollError, TriggerError};

/// A pipeline that ran to a terminal result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedRun {
    pub pipeline: String,
    pub pipeline_id: u32,
    pub run_id: u64,
    pub result: TerminalResult,
    /// Number of status queries it took to observe the result
    pub polls: u32,
}

/// How a sequence ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceOutcome {
    /// Every pipeline finished with `succeeded`
    Succeeded,
    /// A pipeline could not be started
    TriggerFailed(TriggerError),
    /// A started run could not be followed to the end
    PollFailed(PollError),
    /// A run finished with something other than `succeeded`
    RunFailed {
        pipeline: String,
        run_id: u64,
        result: TerminalResult,
    },
}

impl SequenceOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SequenceOutcome::Succeeded)
    }

    /// Process exit code for this outcome
    pub fn exit_code(&self) -> u8 {
        if self.is_success() { 0 } else { 1 }
    }

    /// Name of the pipeline that stopped the sequence, if any
    pub fn failed_pipeline(&self) -> Option<&str> {
        match self {
            SequenceOutcome::Succeeded => None,
            SequenceOutcome::TriggerFailed(e) => Some(&e.pipeline),
            SequenceOutcome::PollFailed(e) => Some(&e.pipeline),
            SequenceOutcome::RunFailed { pipeline, .. } => Some(pipeline),
        }
    }
}

impl std::fmt::Display for SequenceOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SequenceOutcome::Succeeded => write!(f, "all pipelines succeeded"),
            SequenceOutcome::TriggerFailed(e) => write!(f, "{}", e),
            SequenceOutcome::PollFailed(e) => write!(f, "{}", e),
            SequenceOutcome::RunFailed {
                pipeline,
                run_id,
                result,
            } => write!(
                f,
                "pipeline '{}' run {} finished with result '{}'",
                pipeline, run_id, result
            ),
        }
    }
}

/// Everything a sequence did, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceReport {
    /// Runs that reached a terminal result, including a failing last one
    pub completed: Vec<CompletedRun>,
    pub outcome: SequenceOutcome,
}

impl SequenceReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn exit_code(&self) -> u8 {
        self.outcome.exit_code()
    }
}
