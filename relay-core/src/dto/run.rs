//! Run DTOs for the pipeline-runs REST API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::run::{RunState, TerminalResult};

/// Body of a start-run request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunPipelineRequest {
    pub resources: RunResources,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResources {
    pub repositories: RepositoryResources,
}

/// Repository overrides; only the pipeline's own repository is ever set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryResources {
    #[serde(rename = "self")]
    pub self_repo: RepositoryRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRef {
    pub ref_name: String,
}

impl RunPipelineRequest {
    /// Build a request that runs the pipeline's own repository at `ref_name`
    pub fn for_ref(ref_name: impl Into<String>) -> Self {
        Self {
            resources: RunResources {
                repositories: RepositoryResources {
                    self_repo: RepositoryRef {
                        ref_name: ref_name.into(),
                    },
                },
            },
        }
    }
}

/// A pipeline run as reported by the remote service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    pub state: String,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Run {
    /// Map the remote `state`/`result` pair onto a [`RunState`]
    ///
    /// `canceling` is still in flight; any state the service adds later is
    /// treated as terminal so the poll loop cannot spin on it forever.
    pub fn run_state(&self) -> RunState {
        match self.state.as_str() {
            "notStarted" | "queued" | "postponed" => RunState::Queued,
            "inProgress" | "canceling" => RunState::InProgress,
            _ => {
                let result = self
                    .result
                    .as_deref()
                    .map(TerminalResult::from)
                    .unwrap_or_else(|| TerminalResult::Other("unknown".to_string()));
                RunState::Completed(result)
            }
        }
    }

    /// Wall-clock duration in seconds, once the run has finished
    pub fn duration_secs(&self) -> Option<i64> {
        match (self.created_date, self.finished_date) {
            (Some(created), Some(finished)) => {
                Some(finished.signed_duration_since(created).num_seconds())
            }
            _ => None,
        }
    }
}
