//! Progress reporting
//!
//! Human-facing progress hooks. The scheduler calls these in order as it
//! works through the sequence; every method has an empty default so a sink
//! only implements what it displays.

use relay_core::domain::pipeline::PipelineSpec;
use relay_core::domain::run::{RunHandle, RunState, TerminalResult};

use crate::scheduler::SequenceReport;

/// Service trait for reporting sequence progress
pub trait ProgressSink: Send + Sync {
    /// Called once before the first trigger
    fn sequence_started(&self, _specs: &[PipelineSpec]) {}

    /// Called when a run has been started
    fn pipeline_triggered(&self, _spec: &PipelineSpec, _handle: &RunHandle) {}

    /// Called after every status query
    ///
    /// # Arguments
    /// * `attempt` - 1-based count of status queries for this run
    fn poll_observed(
        &self,
        _spec: &PipelineSpec,
        _handle: &RunHandle,
        _state: &RunState,
        _attempt: u32,
    ) {
    }

    /// Called once a run has reached a terminal result
    fn pipeline_finished(
        &self,
        _spec: &PipelineSpec,
        _handle: &RunHandle,
        _result: &TerminalResult,
    ) {
    }

    /// Called once after the sequence stopped, successfully or not
    fn sequence_finished(&self, _report: &SequenceReport) {}
}

/// Sink that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {}
