//! Repository layer
//!
//! Repositories are stateless HTTP wrappers around the pipeline-runs API.
//! They carry no sequencing logic; the scheduler decides what to call and when.
//!
//! The repository is trait-based so the scheduler can be exercised against
//! scripted responses.

mod runs;

pub use runs::{HttpRunRepository, RunRepository};
