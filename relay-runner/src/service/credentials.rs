//! Credential sources
//!
//! Where the personal access token comes from. The runner asks exactly once,
//! when the repository is built. Sources report `Ok(None)` when they simply
//! have nothing to offer, so they can be chained; `Err` means the source
//! itself is broken.

use anyhow::{Context, Result};
use std::io::{BufRead, IsTerminal, Write};
use tracing::debug;

/// Service trait for obtaining the personal access token
pub trait CredentialSource: Send + Sync {
    /// Short description used in logs and error messages
    fn describe(&self) -> String;

    /// Looks up the token
    ///
    /// # Returns
    /// `Ok(None)` when this source holds no token
    fn lookup(&self) -> Result<Option<String>>;

    /// Looks up the token, failing when none is available
    fn token(&self) -> Result<String> {
        match self.lookup()? {
            Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => anyhow::bail!("no personal access token found in {}", self.describe()),
        }
    }
}

/// Fixed token, mostly useful in tests
pub struct StaticCredential {
    token: String,
}

impl StaticCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl CredentialSource for StaticCredential {
    fn describe(&self) -> String {
        "static credential".to_string()
    }

    fn lookup(&self) -> Result<Option<String>> {
        Ok(Some(self.token.clone()))
    }
}

/// Token read from an environment variable
pub struct EnvCredential {
    variable: String,
}

impl EnvCredential {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }
}

impl CredentialSource for EnvCredential {
    fn describe(&self) -> String {
        format!("environment variable {}", self.variable)
    }

    fn lookup(&self) -> Result<Option<String>> {
        match std::env::var(&self.variable) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", self.variable)),
        }
    }
}

/// Token read from the OS credential store
///
/// Lookup only; storing the token is left to the platform's own tools.
pub struct KeyringCredential {
    service: String,
    account: String,
}

impl KeyringCredential {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            account: account.into(),
        }
    }
}

impl CredentialSource for KeyringCredential {
    fn describe(&self) -> String {
        format!("keyring entry {}/{}", self.service, self.account)
    }

    fn lookup(&self) -> Result<Option<String>> {
        let entry = keyring::Entry::new(&self.service, &self.account)
            .with_context(|| format!("Failed to open {}", self.describe()))?;

        match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            // No usable credential store on this machine; let the next source try.
            Err(keyring::Error::PlatformFailure(e)) | Err(keyring::Error::NoStorageAccess(e)) => {
                debug!("Credential store unavailable: {}", e);
                Ok(None)
            }
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", self.describe())),
        }
    }
}

/// Token typed in by the operator
///
/// Only prompts when stdin is a terminal, so unattended runs fail fast
/// instead of hanging on a read.
pub struct PromptCredential {
    message: String,
}

impl PromptCredential {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl CredentialSource for PromptCredential {
    fn describe(&self) -> String {
        "interactive prompt".to_string()
    }

    fn lookup(&self) -> Result<Option<String>> {
        let stdin = std::io::stdin();
        if !stdin.is_terminal() {
            return Ok(None);
        }

        eprint!("{}", self.message);
        std::io::stderr().flush().ok();

        let mut line = String::new();
        stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read token from stdin")?;

        let token = line.trim().to_string();
        Ok((!token.is_empty()).then_some(token))
    }
}

/// Tries each source in order and returns the first token found
pub struct ChainCredential {
    sources: Vec<Box<dyn CredentialSource>>,
}

impl ChainCredential {
    pub fn new(sources: Vec<Box<dyn CredentialSource>>) -> Self {
        Self { sources }
    }
}

impl CredentialSource for ChainCredential {
    fn describe(&self) -> String {
        let parts: Vec<String> = self.sources.iter().map(|s| s.describe()).collect();
        if parts.is_empty() {
            "empty credential chain".to_string()
        } else {
            parts.join(", ")
        }
    }

    fn lookup(&self) -> Result<Option<String>> {
        for source in &self.sources {
            if let Some(token) = source.lookup()? {
                if !token.trim().is_empty() {
                    debug!("Using token from {}", source.describe());
                    return Ok(Some(token));
                }
            }
        }
        Ok(None)
    }
}
