//! Relay Core
//!
//! Core types shared by the Relay crates.
//!
//! This crate contains:
//! - Domain types: pipeline specs, run handles and observed run states
//! - DTOs: wire representations of the pipeline-runs REST API

pub mod domain;
pub mod dto;
