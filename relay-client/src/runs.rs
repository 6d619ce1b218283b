//! Pipeline run endpoints

use relay_core::dto::run::{Run, RunPipelineRequest};
use tracing::debug;

use crate::DevOpsClient;
use crate::error::Result;

impl DevOpsClient {
    // =============================================================================
    // Run Lifecycle
    // =============================================================================

    /// Start a new run of a pipeline definition
    ///
    /// # Arguments
    /// * `pipeline_id` - The pipeline definition id
    /// * `ref_name` - Fully qualified branch reference (e.g., "refs/heads/main")
    ///
    /// # Returns
    /// The newly created run, carrying its assigned id
    pub async fn start_run(&self, pipeline_id: u32, ref_name: &str) -> Result<Run> {
        let url = self.endpoint(&["pipelines", &pipeline_id.to_string(), "runs"])?;
        debug!(%url, ref_name, "starting pipeline run");

        let response = self
            .authorized(self.client.post(url))
            .json(&RunPipelineRequest::for_ref(ref_name))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get a run by id
    ///
    /// # Arguments
    /// * `pipeline_id` - The pipeline definition id the run belongs to
    /// * `run_id` - The run id returned by [`DevOpsClient::start_run`]
    pub async fn get_run(&self, pipeline_id: u32, run_id: u64) -> Result<Run> {
        let url = self.endpoint(&[
            "pipelines",
            &pipeline_id.to_string(),
            "runs",
            &run_id.to_string(),
        ])?;
        debug!(%url, "fetching pipeline run");

        let response = self.authorized(self.client.get(url)).send().await?;

        self.handle_response(response).await
    }
}
