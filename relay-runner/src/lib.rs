//! Relay Runner
//!
//! Triggers a fixed, ordered list of pipelines one at a time and waits for each
//! run to finish before starting the next. The first trigger failure, poll
//! failure or non-succeeded run stops the sequence.
//!
//! Architecture:
//! - Configuration: organization, project, poll settings and the pipeline list
//! - Repository: HTTP access to the pipeline-runs API
//! - Services: injected capabilities (credentials, sleeping, progress reporting)
//! - Scheduler: the sequential trigger-and-poll loop

pub mod config;
pub mod repository;
pub mod scheduler;
pub mod service;

pub use config::RunnerConfig;
pub use scheduler::{
    CompletedRun, PollError, PollSettings, SequenceOutcome, SequenceReport, SequenceRunner,
    TriggerError,
};
