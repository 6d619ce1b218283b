//! Configuration module
//!
//! Resolves the runner configuration file and the credential chain from the
//! command-line settings.

use anyhow::Result;
use relay_runner::RunnerConfig;
use relay_runner::repository::HttpRunRepository;
use relay_runner::service::{
    ChainCredential, CredentialSource, EnvCredential, KeyringCredential, PromptCredential,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Keyring service name; the account is the organization
const KEYRING_SERVICE: &str = "relay";

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the TOML configuration file
    pub config_path: PathBuf,

    /// Environment variable holding the personal access token
    pub pat_env: String,
}

impl Config {
    /// Loads, overrides and validates the runner configuration
    pub fn load_runner_config(&self) -> Result<RunnerConfig> {
        let config = RunnerConfig::load_from(&self.config_path)?.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Credential lookup order: environment, OS keyring, interactive prompt
    pub fn credentials(&self, organization: &str) -> ChainCredential {
        let sources: Vec<Box<dyn CredentialSource>> = vec![
            Box::new(EnvCredential::new(&self.pat_env)),
            Box::new(KeyringCredential::new(KEYRING_SERVICE, organization)),
            Box::new(PromptCredential::new(format!(
                "Personal access token for {}: ",
                organization
            ))),
        ];
        ChainCredential::new(sources)
    }

    /// Builds the HTTP repository; the credential is resolved on first use
    pub fn repository(&self, runner_config: &RunnerConfig) -> Result<HttpRunRepository> {
        let credentials = Arc::new(self.credentials(&runner_config.organization));
        HttpRunRepository::from_config(runner_config, credentials)
    }
}
