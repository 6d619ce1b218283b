//! Sequential pipeline runner
//!
//! Triggers each pipeline, polls the run at a fixed interval until it reaches
//! a terminal result, then moves on to the next one. Only one run is in flight
//! at any time: the next trigger is issued only after the previous run is
//! terminal. There is no retry and no rollback; the first failure ends the
//! sequence.

use relay_core::domain::pipeline::PipelineSpec;
use relay_core::domain::run::{RunHandle, RunState, TerminalResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::error::{PollError, TriggerError};
use super::outcome::{CompletedRun, SequenceOutcome, SequenceReport};
use crate::config::RunnerConfig;
use crate::repository::RunRepository;
use crate::service::{NoopProgress, ProgressSink, Sleeper};

/// Poll timing for a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Fixed delay between two status queries of the same run
    pub interval: Duration,
    /// Give up on a run after this many status queries; `None` never gives up
    pub max_polls: Option<u32>,
}

impl PollSettings {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_polls: None,
        }
    }

    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = Some(max_polls);
        self
    }
}

impl From<&RunnerConfig> for PollSettings {
    fn from(config: &RunnerConfig) -> Self {
        Self {
            interval: config.poll_interval,
            max_polls: config.max_polls,
        }
    }
}

/// Runs pipeline specs one at a time, stopping at the first failure
pub struct SequenceRunner {
    settings: PollSettings,
    repository: Arc<dyn RunRepository>,
    sleeper: Arc<dyn Sleeper>,
    progress: Arc<dyn ProgressSink>,
}

impl SequenceRunner {
    /// Creates a new sequence runner
    pub fn new(
        settings: PollSettings,
        repository: Arc<dyn RunRepository>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            settings,
            repository,
            sleeper,
            progress: Arc::new(NoopProgress),
        }
    }

    /// Reports progress to `progress` instead of discarding it
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Starts a new run of `spec`
    ///
    /// Issues exactly one start request. Nothing is retried.
    pub async fn trigger(&self, spec: &PipelineSpec) -> Result<RunHandle, TriggerError> {
        spec.validate().map_err(|message| TriggerError::new(spec, message))?;

        let ref_name = spec.ref_name();
        info!("Triggering pipeline {} (#{}) on {}", spec.name, spec.id, ref_name);

        let run = self
            .repository
            .start_run(spec.id, &ref_name)
            .await
            .map_err(|e| TriggerError::new(spec, format!("{:#}", e)))?;

        let handle = RunHandle {
            run_id: run.id,
            pipeline_id: spec.id,
        };

        info!("Pipeline {} started run {}", spec.name, handle.run_id);
        self.progress.pipeline_triggered(spec, &handle);

        Ok(handle)
    }

    /// Polls a started run until it reaches a terminal result
    ///
    /// The first status query happens immediately; each following one waits
    /// the configured interval. A failed query ends the wait with a
    /// [`PollError`].
    pub async fn await_completion(
        &self,
        spec: &PipelineSpec,
        handle: &RunHandle,
    ) -> Result<TerminalResult, PollError> {
        self.poll_until_terminal(spec, handle)
            .await
            .map(|(result, _)| result)
    }

    async fn poll_until_terminal(
        &self,
        spec: &PipelineSpec,
        handle: &RunHandle,
    ) -> Result<(TerminalResult, u32), PollError> {
        let mut attempt = 0u32;

        loop {
            attempt += 1;

            let run = self
                .repository
                .get_run(handle.pipeline_id, handle.run_id)
                .await
                .map_err(|e| PollError::new(spec, handle, format!("{:#}", e)))?;

            let state = run.run_state();
            debug!(
                "Run {} of {} is {} (poll {})",
                handle.run_id, spec.name, state, attempt
            );
            self.progress.poll_observed(spec, handle, &state, attempt);

            if let RunState::Completed(result) = &state {
                self.progress.pipeline_finished(spec, handle, result);
                return Ok((result.clone(), attempt));
            }

            if let Some(max_polls) = self.settings.max_polls {
                if attempt >= max_polls {
                    warn!(
                        "Giving up on run {} of {} after {} polls",
                        handle.run_id, spec.name, attempt
                    );
                    return Err(PollError::new(
                        spec,
                        handle,
                        format!("run still {} after {} polls", state, attempt),
                    ));
                }
            }

            self.sleeper.sleep(self.settings.interval).await;
        }
    }

    /// Runs every spec in order, stopping at the first failure
    ///
    /// An empty slice performs no remote calls and succeeds.
    pub async fn run(&self, specs: &[PipelineSpec]) -> SequenceReport {
        info!("Running {} pipeline(s) sequentially", specs.len());
        self.progress.sequence_started(specs);

        let mut completed = Vec::with_capacity(specs.len());
        let outcome = self.run_specs(specs, &mut completed).await;

        match &outcome {
            SequenceOutcome::Succeeded => info!("All {} pipeline(s) succeeded", specs.len()),
            other => error!("Sequence stopped: {}", other),
        }

        let report = SequenceReport { completed, outcome };
        self.progress.sequence_finished(&report);
        report
    }

    async fn run_specs(
        &self,
        specs: &[PipelineSpec],
        completed: &mut Vec<CompletedRun>,
    ) -> SequenceOutcome {
        for spec in specs {
            let handle = match self.trigger(spec).await {
                Ok(handle) => handle,
                Err(e) => return SequenceOutcome::TriggerFailed(e),
            };

            let (result, polls) = match self.poll_until_terminal(spec, &handle).await {
                Ok(finished) => finished,
                Err(e) => return SequenceOutcome::PollFailed(e),
            };

            info!(
                "Pipeline {} run {} finished: {}",
                spec.name, handle.run_id, result
            );

            completed.push(CompletedRun {
                pipeline: spec.name.clone(),
                pipeline_id: handle.pipeline_id,
                run_id: handle.run_id,
                result: result.clone(),
                polls,
            });

            if !result.is_success() {
                return SequenceOutcome::RunFailed {
                    pipeline: spec.name.clone(),
                    run_id: handle.run_id,
                    result,
                };
            }
        }

        SequenceOutcome::Succeeded
    }
}
