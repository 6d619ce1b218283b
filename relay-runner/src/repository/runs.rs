//! Runs repository
//!
//! Handles the two remote calls the scheduler depends on:
//! - Starting a run of a pipeline definition on a branch
//! - Reading a run's current state

use anyhow::{Context, Result};
use async_trait::async_trait;
use relay_client::{AuthHeader, ClientError, DevOpsClient};
use relay_core::domain::pipeline::PipelineSpec;
use relay_core::dto::run::Run;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::config::RunnerConfig;
use crate::service::CredentialSource;

/// Repository trait for pipeline run operations
#[async_trait]
pub trait RunRepository: Send + Sync {
    /// Starts a new run
    ///
    /// # Arguments
    /// * `pipeline_id` - The pipeline definition id
    /// * `ref_name` - Fully qualified branch reference
    async fn start_run(&self, pipeline_id: u32, ref_name: &str) -> Result<Run>;

    /// Fetches the current state of a run
    ///
    /// # Arguments
    /// * `pipeline_id` - The pipeline definition id
    /// * `run_id` - The run id assigned when the run was started
    async fn get_run(&self, pipeline_id: u32, run_id: u64) -> Result<Run>;
}

/// HTTP implementation of RunRepository
///
/// The credential is resolved on first use and at most once; the resulting
/// client is reused for every later request.
pub struct HttpRunRepository {
    base_url: String,
    organization: String,
    project: String,
    http: reqwest::Client,
    credentials: Arc<dyn CredentialSource>,
    client: OnceCell<DevOpsClient>,
}

impl HttpRunRepository {
    /// Creates a repository for the configured organization and project
    ///
    /// No credential is looked up here.
    pub fn from_config(
        config: &RunnerConfig,
        credentials: Arc<dyn CredentialSource>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: config.base_url.clone(),
            organization: config.organization.clone(),
            project: config.project.clone(),
            http,
            credentials,
            client: OnceCell::new(),
        })
    }

    /// Resolves the credential when `specs` has work to do
    ///
    /// Lets callers surface a missing token before the first trigger while an
    /// empty sequence never asks for one.
    pub async fn prepare_for(&self, specs: &[PipelineSpec]) -> Result<()> {
        if specs.is_empty() {
            debug!("Nothing to run; credential not resolved");
            return Ok(());
        }
        self.client().await.map(|_| ())
    }

    async fn client(&self) -> Result<&DevOpsClient> {
        self.client
            .get_or_try_init(|| async {
                let token = self
                    .credentials
                    .token()
                    .context("Failed to obtain a personal access token")?;
                let auth = AuthHeader::from_pat(&token).context("Failed to build auth header")?;

                Ok::<_, anyhow::Error>(DevOpsClient::with_client(
                    self.base_url.clone(),
                    self.organization.clone(),
                    self.project.clone(),
                    auth,
                    self.http.clone(),
                ))
            })
            .await
    }
}

/// Wraps a client error, pointing at the token when the service rejected it
fn describe_error(error: ClientError, action: String) -> anyhow::Error {
    let rejected = error.is_auth_error();
    let error = anyhow::Error::new(error).context(action);
    if rejected {
        error.context("the personal access token was rejected")
    } else {
        error
    }
}

#[async_trait]
impl RunRepository for HttpRunRepository {
    async fn start_run(&self, pipeline_id: u32, ref_name: &str) -> Result<Run> {
        self.client()
            .await?
            .start_run(pipeline_id, ref_name)
            .await
            .map_err(|e| {
                describe_error(
                    e,
                    format!("Failed to start pipeline {} on {}", pipeline_id, ref_name),
                )
            })
    }

    async fn get_run(&self, pipeline_id: u32, run_id: u64) -> Result<Run> {
        self.client()
            .await?
            .get_run(pipeline_id, run_id)
            .await
            .map_err(|e| {
                describe_error(
                    e,
                    format!("Failed to fetch run {} of pipeline {}", run_id, pipeline_id),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{PollSettings, SequenceRunner};
    use crate::service::TokioSleeper;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct CountingCredential {
        lookups: AtomicUsize,
        token: Option<&'static str>,
    }

    impl CredentialSource for CountingCredential {
        fn describe(&self) -> String {
            "counting credential".to_string()
        }

        fn lookup(&self) -> Result<Option<String>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.token.map(str::to_string))
        }
    }

    fn config(base_url: &str) -> RunnerConfig {
        let mut config = RunnerConfig::new("contoso".to_string(), "web".to_string());
        config.base_url = base_url.to_string();
        config
    }

    #[tokio::test]
    async fn test_empty_sequence_never_asks_for_token() {
        let credentials = Arc::new(CountingCredential::default());
        let repository =
            HttpRunRepository::from_config(&config("https://dev.azure.com"), credentials.clone())
                .unwrap();

        repository.prepare_for(&[]).await.unwrap();

        let runner = SequenceRunner::new(
            PollSettings::new(Duration::from_secs(30)),
            Arc::new(repository),
            Arc::new(TokioSleeper),
        );
        let report = runner.run(&[]).await;

        assert!(report.is_success());
        assert_eq!(report.exit_code(), 0);
        assert_eq!(credentials.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_token_fails_prepare() {
        let credentials = Arc::new(CountingCredential::default());
        let repository =
            HttpRunRepository::from_config(&config("https://dev.azure.com"), credentials.clone())
                .unwrap();

        let specs = vec![PipelineSpec::new("api", 12, "main")];
        let err = repository.prepare_for(&specs).await.unwrap_err();

        assert!(format!("{:#}", err).contains("personal access token"));
        assert_eq!(credentials.lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_token_is_resolved_once() {
        let credentials = Arc::new(CountingCredential {
            lookups: AtomicUsize::new(0),
            token: Some("pat"),
        });
        // An unparseable base URL fails inside the client before any network I/O.
        let repository =
            HttpRunRepository::from_config(&config("not a url"), credentials.clone()).unwrap();

        let specs = vec![PipelineSpec::new("api", 12, "main")];
        repository.prepare_for(&specs).await.unwrap();
        assert!(repository.start_run(12, "refs/heads/main").await.is_err());
        assert!(repository.get_run(12, 7).await.is_err());

        assert_eq!(credentials.lookups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_rejected_token_is_called_out() {
        let err = describe_error(
            ClientError::api_error(401, "Unauthorized"),
            "Failed to start pipeline 12 on refs/heads/main".to_string(),
        );
        let message = format!("{:#}", err);
        assert!(message.starts_with("the personal access token was rejected"));
        assert!(message.contains("Failed to start pipeline 12"));
    }

    #[test]
    fn test_other_errors_keep_plain_context() {
        let err = describe_error(
            ClientError::api_error(500, "boom"),
            "Failed to fetch run 7 of pipeline 12".to_string(),
        );
        let message = format!("{:#}", err);
        assert!(!message.contains("rejected"));
        assert!(message.starts_with("Failed to fetch run 7 of pipeline 12"));
    }
}
