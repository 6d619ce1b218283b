//! Scheduler layer
//!
//! Runs the configured pipelines strictly one after another: trigger, poll
//! until terminal, move on. The first failure of any kind stops the sequence.

mod error;
mod outcome;
mod sequence;

pub use error::{PollError, TriggerError};
pub use outcome::{CompletedRun, SequenceOutcome, SequenceReport};
pub use sequence::{PollSettings, SequenceRunner};
