//! Scheduler error types

use relay_core::domain::pipeline::PipelineSpec;
use relay_core::domain::run::RunHandle;
use thiserror::Error;

/// A run could not be started
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to trigger pipeline '{pipeline}': {message}")]
pub struct TriggerError {
    /// Name of the pipeline spec that could not start
    pub pipeline: String,
    /// Underlying error message
    pub message: String,
}

impl TriggerError {
    pub fn new(spec: &PipelineSpec, message: impl Into<String>) -> Self {
        Self {
            pipeline: spec.name.clone(),
            message: message.into(),
        }
    }
}

/// A started run could not be followed to a terminal state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to poll run {run_id} of pipeline '{pipeline}' (#{pipeline_id}): {message}")]
pub struct PollError {
    pub pipeline: String,
    pub run_id: u64,
    pub pipeline_id: u32,
    /// Underlying error message
    pub message: String,
}

impl PollError {
    pub fn new(spec: &PipelineSpec, handle: &RunHandle, message: impl Into<String>) -> Self {
        Self {
            pipeline: spec.name.clone(),
            run_id: handle.run_id,
            pipeline_id: handle.pipeline_id,
            message: message.into(),
        }
    }
}
