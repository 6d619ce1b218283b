//! Data Transfer Objects for the pipeline-runs REST API
//!
//! Wire shapes exchanged with the remote pipeline service. Conversion into
//! domain types happens here so the client and runner never inspect raw strings.

pub mod run;
