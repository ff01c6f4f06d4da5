use serde_json::Value as JsonValue;
use tracing::{info, instrument, warn};

use crate::dto::application_dto::{RawApplication, StatusUpdate};
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus};
use crate::services::api_client::ApiClient;
use crate::utils::time;

#[derive(Clone)]
pub struct ApplicationService {
    api: ApiClient,
}

impl ApplicationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All applications visible to the caller, statuses normalized.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Application>> {
        let raw: Vec<RawApplication> = self.api.get("/applications").await?;
        let applications: Vec<Application> = raw.into_iter().map(Application::from).collect();
        info!(count = applications.len(), "Fetched applications");
        Ok(applications)
    }

    /// Move `application` to `target` and return its new state.
    ///
    /// Targets outside the workflow table are refused before any request is
    /// made. The caller's copy is left untouched; merging is up to the caller.
    #[instrument(skip(self, application), fields(id = %application.id, from = %application.status))]
    pub async fn transition(
        &self,
        application: &Application,
        target: ApplicationStatus,
    ) -> Result<Application> {
        if !application.status.can_transition_to(target) {
            warn!(to = %target, "Refusing illegal status transition");
            return Err(Error::IllegalTransition {
                from: application.status,
                to: target,
            });
        }

        let response: Option<JsonValue> = self
            .api
            .put_optional(
                &format!("/applications/{}", application.id),
                &StatusUpdate { status: target },
            )
            .await?;

        let updated_at = response
            .as_ref()
            .and_then(|body| body.get("updated_at"))
            .and_then(JsonValue::as_str)
            .and_then(time::parse_timestamp)
            .unwrap_or_else(time::now);

        info!(to = %target, "Application status updated");
        Ok(Application {
            status: target,
            updated_at: Some(updated_at),
            ..application.clone()
        })
    }
}
