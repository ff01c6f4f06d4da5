use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use crate::error::{Error, Result};
use crate::models::job::Job;
use crate::models::ResourceId;
use crate::services::job_service::JobService;
use crate::services::notification_service::Notifier;
use crate::session::SessionStore;
use crate::views::busy::Busy;

/// Store key holding the JSON list of saved job ids.
pub const SAVED_JOBS_KEY: &str = "savedJobs";

#[derive(Debug, Clone, PartialEq)]
pub enum JobDetailsState {
    Loading,
    Loaded(Box<Job>),
    NotFound,
}

/// Single job page for candidates.
pub struct JobDetails {
    id: ResourceId,
    service: JobService,
    store: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    state: JobDetailsState,
    saved: bool,
    applying: Busy,
}

impl JobDetails {
    pub fn new(
        id: ResourceId,
        service: JobService,
        store: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let saved = read_saved(store.as_ref()).contains(&id);
        Self {
            id,
            service,
            store,
            notifier,
            state: JobDetailsState::Loading,
            saved,
            applying: Busy::new(),
        }
    }

    /// Fetch the job. A missing job is a page state, not a notification.
    pub async fn load(&mut self) {
        self.state = JobDetailsState::Loading;
        self.state = match self.service.get(&self.id).await {
            Ok(job) => JobDetailsState::Loaded(Box::new(job)),
            Err(Error::NotFound(_)) => JobDetailsState::NotFound,
            Err(e) => {
                self.notifier.failure(&e, "Failed to load job details");
                JobDetailsState::NotFound
            }
        };
    }

    pub fn state(&self) -> &JobDetailsState {
        &self.state
    }

    pub fn job(&self) -> Option<&Job> {
        match &self.state {
            JobDetailsState::Loaded(job) => Some(&**job),
            _ => None,
        }
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub fn is_applying(&self) -> bool {
        self.applying.get()
    }

    pub fn applying_events(&self) -> watch::Receiver<bool> {
        self.applying.subscribe()
    }

    pub fn skills(&self) -> &[String] {
        self.job().map(|j| j.skills.as_slice()).unwrap_or_default()
    }

    pub async fn apply(&mut self) -> bool {
        let Some(title) = self.job().map(|j| j.title.clone()) else {
            return false;
        };

        let _applying = self.applying.begin();
        match self.service.apply(&self.id).await {
            Ok(()) => {
                if let JobDetailsState::Loaded(job) = &mut self.state {
                    job.has_applied = true;
                }
                self.notifier
                    .success(&format!("Successfully applied for \"{}\"!", title));
                true
            }
            Err(e) => {
                self.notifier.failure(&e, "Failed to apply for job");
                false
            }
        }
    }

    /// Flip the saved flag for this job and persist the saved list.
    pub fn toggle_saved(&mut self) -> Result<bool> {
        let mut ids = read_saved(self.store.as_ref());
        if self.saved {
            ids.retain(|id| id != &self.id);
        } else if !ids.contains(&self.id) {
            ids.push(self.id.clone());
        }
        self.store
            .set(SAVED_JOBS_KEY, &serde_json::to_string(&ids)?)?;

        self.saved = !self.saved;
        self.notifier.success(if self.saved {
            "Job saved successfully"
        } else {
            "Job removed from saved"
        });
        Ok(self.saved)
    }
}

/// Saved job ids; an unreadable entry counts as empty.
pub fn read_saved(store: &dyn SessionStore) -> Vec<ResourceId> {
    match store.get(SAVED_JOBS_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "Saved jobs entry is unreadable");
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read saved jobs");
            Vec::new()
        }
    }
}
