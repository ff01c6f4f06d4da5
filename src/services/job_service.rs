use serde_json::Value as JsonValue;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::application_dto::ApplyRequest;
use crate::dto::job_dto::JobPayload;
use crate::error::Result;
use crate::models::job::Job;
use crate::models::ResourceId;
use crate::services::api_client::ApiClient;

#[derive(Clone)]
pub struct JobService {
    api: ApiClient,
}

impl JobService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Job>> {
        let jobs: Vec<Job> = self.api.get("/jobs").await?;
        info!(count = jobs.len(), "Fetched jobs");
        Ok(jobs)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &ResourceId) -> Result<Job> {
        self.api.get(&format!("/jobs/{}", id)).await
    }

    #[instrument(skip(self, payload), fields(title = %payload.title))]
    pub async fn create(&self, payload: &JobPayload) -> Result<()> {
        payload.validate()?;
        let _: JsonValue = self.api.post("/jobs", payload).await?;
        info!("Job created");
        Ok(())
    }

    #[instrument(skip(self, payload), fields(title = %payload.title))]
    pub async fn update(&self, id: &ResourceId, payload: &JobPayload) -> Result<()> {
        payload.validate()?;
        let _: JsonValue = self.api.put(&format!("/jobs/{}", id), payload).await?;
        info!("Job updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &ResourceId) -> Result<()> {
        self.api.delete(&format!("/jobs/{}", id)).await?;
        info!("Job deleted");
        Ok(())
    }

    /// Submit an application for the signed-in candidate.
    #[instrument(skip(self))]
    pub async fn apply(&self, job_id: &ResourceId) -> Result<()> {
        let request = ApplyRequest {
            job_id: job_id.clone(),
        };
        let _: JsonValue = self.api.post("/applications", &request).await?;
        info!("Application submitted");
        Ok(())
    }
}
