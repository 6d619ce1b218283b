//! Relay HTTP Client
//!
//! A small, type-safe HTTP client for the Azure DevOps pipeline-runs API.
//!
//! Only the two calls the runner needs are exposed: starting a run of a
//! pipeline definition on a branch, and reading a run back.
//!
//! # Example
//!
//! ```no_run
//! use relay_client::{AuthHeader, DevOpsClient};
//!
//! # async fn example() -> relay_client::Result<()> {
//! let auth = AuthHeader::from_pat("my-pat")?;
//! let client = DevOpsClient::new("https://dev.azure.com", "contoso", "web", auth);
//!
//! let run = client.start_run(12, "refs/heads/main").await?;
//! println!("Started run {}", run.id);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod error;
mod runs;

// Re-export commonly used types
pub use auth::AuthHeader;
pub use error::{ClientError, Result};
pub use relay_core::dto::run::Run;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

/// Default service root for cloud-hosted organizations
pub const DEFAULT_BASE_URL: &str = "https://dev.azure.com";

/// REST API version pinned for every call
pub const API_VERSION: &str = "7.1";

/// HTTP client for the pipeline-runs API of one organization/project
#[derive(Debug, Clone)]
pub struct DevOpsClient {
    /// Service root (e.g., "https://dev.azure.com")
    base_url: String,
    organization: String,
    project: String,
    auth: AuthHeader,
    /// HTTP client instance
    client: Client,
}

impl DevOpsClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Service root; trailing slashes are trimmed
    /// * `organization` - Organization name
    /// * `project` - Project name (may contain spaces)
    /// * `auth` - Authorization header computed once up front
    pub fn new(
        base_url: impl Into<String>,
        organization: impl Into<String>,
        project: impl Into<String>,
        auth: AuthHeader,
    ) -> Self {
        Self::with_client(base_url, organization, project, auth, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        organization: impl Into<String>,
        project: impl Into<String>,
        auth: AuthHeader,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            organization: organization.into(),
            project: project.into(),
            auth,
            client,
        }
    }

    /// Get the service root
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build `{base}/{org}/{project}/_apis/{segments..}?api-version=..`
    ///
    /// Segments are percent-encoded, so project names with spaces are safe.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidRequest(format!("invalid base URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidRequest("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .push(&self.organization)
            .push(&self.project)
            .push("_apis")
            .extend(segments);

        url.query_pairs_mut().append_pair("api-version", API_VERSION);

        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, self.auth.header_value().clone())
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// A 203 is how the service answers an unusable PAT (it serves the sign-in
    /// page instead of JSON), so it is reported as an error rather than parsed.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status == StatusCode::NON_AUTHORITATIVE_INFORMATION {
            return Err(ClientError::api_error(
                status.as_u16(),
                "authentication failed: the service returned a sign-in page",
            ));
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
