//! Core domain types
//!
//! These types describe what the runner is asked to do (a [`pipeline::PipelineSpec`])
//! and what it observes on the remote side (a [`run::RunState`]). The runner never
//! drives remote state; it only triggers runs and polls them.

pub mod pipeline;
pub mod run;
