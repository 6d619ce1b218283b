//! Pipeline domain types

use serde::{Deserialize, Serialize};

const HEADS_PREFIX: &str = "refs/heads/";

/// A pipeline definition to trigger, in execution order
///
/// Specs are static configuration: they are loaded once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSpec {
    /// Human-readable name used in progress output and errors
    pub name: String,
    /// Pipeline definition id on the remote service
    pub id: u32,
    /// Branch reference to run against (`main` or `refs/heads/main`)
    #[serde(rename = "ref")]
    pub git_ref: String,
}

impl PipelineSpec {
    pub fn new(name: impl Into<String>, id: u32, git_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id,
            git_ref: git_ref.into(),
        }
    }

    /// Fully qualified reference sent to the remote service
    ///
    /// Short branch names are expanded under `refs/heads/`; anything already
    /// starting with `refs/` is passed through untouched.
    pub fn ref_name(&self) -> String {
        let trimmed = self.git_ref.trim();
        if trimmed.starts_with("refs/") {
            trimmed.to_string()
        } else {
            format!("{}{}", HEADS_PREFIX, trimmed)
        }
    }

    /// Checks the fields a trigger call depends on
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("pipeline name cannot be empty".to_string());
        }
        if self.id == 0 {
            return Err(format!("pipeline '{}' has no id", self.name));
        }
        if self.git_ref.trim().is_empty() {
            return Err(format!("pipeline '{}' has an empty ref", self.name));
        }
        Ok(())
    }
}

impl std::fmt::Display for PipelineSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (#{} @ {})", self.name, self.id, self.git_ref)
    }
}
