//! Runner configuration
//!
//! The organization, project, poll settings and the ordered pipeline list.
//! Loaded from a TOML file, then optionally overridden from the environment.
//! The resulting value is passed into the runner explicitly; nothing here is
//! read from global state after loading.

use anyhow::{Context, Result};
use relay_client::DEFAULT_BASE_URL;
use relay_core::domain::pipeline::PipelineSpec;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Runner configuration
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Service root (e.g., "https://dev.azure.com")
    pub base_url: String,

    /// Organization that owns the project
    pub organization: String,

    /// Project that owns the pipelines
    pub project: String,

    /// Fixed delay between two status queries of the same run
    pub poll_interval: Duration,

    /// Optional bound on status queries per run; `None` polls until terminal
    pub max_polls: Option<u32>,

    /// Upper bound on a single HTTP request, connect to last byte
    pub request_timeout: Duration,

    /// Pipelines in execution order
    pub pipelines: Vec<PipelineSpec>,
}

/// On-disk shape of the configuration file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    base_url: Option<String>,
    organization: String,
    project: String,
    #[serde(default)]
    poll_interval_secs: Option<u64>,
    #[serde(default)]
    max_polls: Option<u32>,
    #[serde(default)]
    request_timeout_secs: Option<u64>,
    #[serde(default)]
    pipelines: Vec<PipelineSpec>,
}

impl RunnerConfig {
    /// Creates a new configuration with defaults
    pub fn new(organization: String, project: String) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            organization,
            project,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_polls: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            pipelines: Vec::new(),
        }
    }

    /// Parses configuration from TOML text
    ///
    /// ```toml
    /// organization = "contoso"
    /// project = "web"
    /// poll_interval_secs = 30
    ///
    /// [[pipelines]]
    /// name = "api"
    /// id = 12
    /// ref = "main"
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content).context("Failed to parse configuration")?;

        let mut config = Self::new(file.organization, file.project);
        if let Some(base_url) = file.base_url {
            config.base_url = base_url;
        }
        if let Some(secs) = file.poll_interval_secs {
            config.poll_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = file.request_timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        config.max_polls = file.max_polls;
        config.pipelines = file.pipelines;

        Ok(config)
    }

    /// Loads configuration from a TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Applies overrides from environment variables
    ///
    /// Recognised variables:
    /// - RELAY_BASE_URL
    /// - RELAY_ORGANIZATION
    /// - RELAY_PROJECT
    /// - RELAY_POLL_INTERVAL (seconds)
    /// - RELAY_MAX_POLLS
    /// - RELAY_REQUEST_TIMEOUT (seconds)
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Applies overrides using a custom variable lookup
    pub fn apply_env_with<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup("RELAY_BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(organization) = lookup("RELAY_ORGANIZATION") {
            self.organization = organization;
        }
        if let Some(project) = lookup("RELAY_PROJECT") {
            self.project = project;
        }
        if let Some(value) = lookup("RELAY_POLL_INTERVAL") {
            let secs = value
                .parse::<u64>()
                .with_context(|| format!("RELAY_POLL_INTERVAL is not a number: {}", value))?;
            self.poll_interval = Duration::from_secs(secs);
        }
        if let Some(value) = lookup("RELAY_MAX_POLLS") {
            let max = value
                .parse::<u32>()
                .with_context(|| format!("RELAY_MAX_POLLS is not a number: {}", value))?;
            self.max_polls = Some(max);
        }
        if let Some(value) = lookup("RELAY_REQUEST_TIMEOUT") {
            let secs = value
                .parse::<u64>()
                .with_context(|| format!("RELAY_REQUEST_TIMEOUT is not a number: {}", value))?;
            self.request_timeout = Duration::from_secs(secs);
        }
        Ok(self)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.organization.trim().is_empty() {
            anyhow::bail!("organization cannot be empty");
        }

        if self.project.trim().is_empty() {
            anyhow::bail!("project cannot be empty");
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!("base_url must start with http:// or https://");
        }

        if self.poll_interval.as_secs() == 0 {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.max_polls == Some(0) {
            anyhow::bail!("max_polls must be greater than 0 when set");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        let mut names = HashSet::new();
        for spec in &self.pipelines {
            spec.validate().map_err(anyhow::Error::msg)?;
            if !names.insert(spec.name.as_str()) {
                anyhow::bail!("pipeline '{}' is configured more than once", spec.name);
            }
        }

        Ok(())
    }

    /// Finds a configured pipeline by name
    pub fn find(&self, name: &str) -> Option<&PipelineSpec> {
        self.pipelines.iter().find(|spec| spec.name == name)
    }

    /// Selects a subset of pipelines, keeping the configured order
    ///
    /// An empty selection means every configured pipeline.
    pub fn select(&self, names: &[String]) -> Result<Vec<PipelineSpec>> {
        if names.is_empty() {
            return Ok(self.pipelines.clone());
        }

        if let Some(unknown) = names.iter().find(|name| self.find(name).is_none()) {
            anyhow::bail!("pipeline '{}' is not configured", unknown);
        }

        Ok(self
            .pipelines
            .iter()
            .filter(|spec| names.contains(&spec.name))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SAMPLE: &str = r#"
organization = "contoso"
project = "Line of Business"
poll_interval_secs = 60

[[pipelines]]
name = "infra"
id = 4
ref = "main"

[[pipelines]]
name = "api"
id = 12
ref = "refs/heads/release/2.1"

[[pipelines]]
name = "web"
id = 13
ref = "develop"
"#;

    #[test]
    fn test_parse_sample() {
        let config = RunnerConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.organization, "contoso");
        assert_eq!(config.project, "Line of Business");
        assert_eq!(config.poll_interval, Duration::from_secs(60));
        assert_eq!(config.max_polls, None);
        let names: Vec<_> = config.pipelines.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["infra", "api", "web"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_poll_interval() {
        let config = RunnerConfig::from_toml_str("organization = \"o\"\nproject = \"p\"").unwrap();
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert!(config.pipelines.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result = RunnerConfig::from_toml_str("organization = \"o\"\nproject = \"p\"\npoll = 5");
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("RELAY_ORGANIZATION", "fabrikam"),
            ("RELAY_POLL_INTERVAL", "5"),
            ("RELAY_MAX_POLLS", "40"),
        ]
        .into_iter()
        .collect();

        let config = RunnerConfig::from_toml_str(SAMPLE)
            .unwrap()
            .apply_env_with(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.organization, "fabrikam");
        assert_eq!(config.project, "Line of Business");
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.max_polls, Some(40));
    }

    #[test]
    fn test_env_override_must_be_numeric() {
        let result = RunnerConfig::from_toml_str(SAMPLE)
            .unwrap()
            .apply_env_with(|key| (key == "RELAY_POLL_INTERVAL").then(|| "soon".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = RunnerConfig::from_toml_str(SAMPLE).unwrap();

        config.poll_interval = Duration::from_secs(0);
        assert!(config.validate().is_err());
        config.poll_interval = Duration::from_secs(30);

        config.base_url = "dev.azure.com".to_string();
        assert!(config.validate().is_err());
        config.base_url = DEFAULT_BASE_URL.to_string();

        config.max_polls = Some(0);
        assert!(config.validate().is_err());
        config.max_polls = None;

        config.pipelines.push(PipelineSpec::new("api", 99, "main"));
        assert!(config.validate().is_err());
        config.pipelines.pop();

        config.pipelines.push(PipelineSpec::new("docs", 0, "main"));
        assert!(config.validate().is_err());
        config.pipelines.pop();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_request_timeout() {
        let config = RunnerConfig::from_toml_str(
            "organization = \"o\"\nproject = \"p\"\nrequest_timeout_secs = 15",
        )
        .unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(15));

        let config = config
            .apply_env_with(|key| (key == "RELAY_REQUEST_TIMEOUT").then(|| "90".to_string()))
            .unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(90));
        assert!(config.validate().is_ok());

        let mut config = config;
        config.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_select_keeps_configured_order() {
        let config = RunnerConfig::from_toml_str(SAMPLE).unwrap();
        let selected = config
            .select(&["web".to_string(), "infra".to_string()])
            .unwrap();
        let names: Vec<_> = selected.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["infra", "web"]);
    }

    #[test]
    fn test_select_unknown_name() {
        let config = RunnerConfig::from_toml_str(SAMPLE).unwrap();
        assert!(config.select(&["mobile".to_string()]).is_err());
        assert_eq!(config.select(&[]).unwrap().len(), 3);
    }
}
