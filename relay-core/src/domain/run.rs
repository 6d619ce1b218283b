//! Run domain types

use serde::{Deserialize, Serialize};

/// Handle to a run started by the runner
///
/// Created when a trigger succeeds and dropped once the run's terminal result
/// is known. Only one handle is alive at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunHandle {
    pub run_id: u64,
    pub pipeline_id: u32,
}

/// Observed state of a remote run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Queued,
    InProgress,
    Completed(TerminalResult),
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Completed(_))
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Queued => write!(f, "queued"),
            RunState::InProgress => write!(f, "inProgress"),
            RunState::Completed(result) => write!(f, "completed ({})", result),
        }
    }
}

/// Final result of a completed run
///
/// Only [`TerminalResult::Succeeded`] counts as success. Values the runner does
/// not recognise are kept verbatim in [`TerminalResult::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TerminalResult {
    Succeeded,
    Failed,
    Canceled,
    Other(String),
}

impl TerminalResult {
    pub fn is_success(&self) -> bool {
        matches!(self, TerminalResult::Succeeded)
    }

    pub fn as_str(&self) -> &str {
        match self {
            TerminalResult::Succeeded => "succeeded",
            TerminalResult::Failed => "failed",
            TerminalResult::Canceled => "canceled",
            TerminalResult::Other(value) => value,
        }
    }
}

impl From<&str> for TerminalResult {
    fn from(value: &str) -> Self {
        match value {
            "succeeded" => TerminalResult::Succeeded,
            "failed" => TerminalResult::Failed,
            "canceled" => TerminalResult::Canceled,
            other => TerminalResult::Other(other.to_string()),
        }
    }
}

impl From<String> for TerminalResult {
    fn from(value: String) -> Self {
        TerminalResult::from(value.as_str())
    }
}

impl From<TerminalResult> for String {
    fn from(result: TerminalResult) -> Self {
        result.as_str().to_string()
    }
}

impl std::fmt::Display for TerminalResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
