use std::sync::Arc;

use tokio::sync::watch;

use crate::models::job::{Job, JobType};
use crate::models::ResourceId;
use crate::services::job_service::JobService;
use crate::services::notification_service::Notifier;
use crate::utils::text::{contains_folded, search_needle};
use crate::views::busy::Busy;
use crate::views::listing::{ListSpec, ListView};

/// Job type (or any) AND a location substring (blank means any).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub job_type: Option<JobType>,
    pub location: String,
}

pub struct JobBoardListing;

impl ListSpec for JobBoardListing {
    type Item = Job;
    type Filter = JobFilter;
    type Sort = ();

    fn search_fields(item: &Job) -> Vec<Option<&str>> {
        vec![
            Some(item.title.as_str()),
            item.company.as_deref(),
            Some(item.description.as_str()),
        ]
    }

    fn matches_filter(item: &Job, filter: &JobFilter) -> bool {
        let type_ok = filter
            .job_type
            .as_ref()
            .map_or(true, |t| item.job_type.as_ref() == Some(t));
        let location_ok = search_needle(&filter.location)
            .map_or(true, |needle| contains_folded(item.location.as_deref(), &needle));
        type_ok && location_ok
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobBoardStats {
    pub total: usize,
    pub applied: usize,
}

/// Candidate job search screen.
pub struct JobBoard {
    service: JobService,
    notifier: Arc<dyn Notifier>,
    list: ListView<JobBoardListing>,
    loading: Busy,
}

impl JobBoard {
    pub fn new(service: JobService, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            list: ListView::new(),
            loading: Busy::new(),
        }
    }

    pub async fn load(&mut self) -> bool {
        let _loading = self.loading.begin();
        match self.service.list().await {
            Ok(jobs) => {
                self.list.set_items(jobs);
                true
            }
            Err(e) => {
                self.notifier.failure(&e, "Failed to load jobs");
                false
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// Follows the loading flag while a fetch is awaited.
    pub fn loading_events(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.list.set_search(search);
    }

    pub fn set_filter(&mut self, filter: JobFilter) {
        self.list.set_filter(filter);
    }

    pub fn visible(&self) -> Vec<&Job> {
        self.list.visible().collect()
    }

    pub fn stats(&self) -> JobBoardStats {
        let jobs = self.list.items();
        JobBoardStats {
            total: jobs.len(),
            applied: jobs.iter().filter(|j| j.has_applied).count(),
        }
    }

    /// Apply to a job and mark it as applied locally on success.
    pub async fn apply(&mut self, id: &ResourceId) -> bool {
        let title = self
            .list
            .items()
            .iter()
            .find(|j| &j.id == id)
            .map(|j| j.title.clone())
            .unwrap_or_else(|| id.to_string());

        match self.service.apply(id).await {
            Ok(()) => {
                self.list.update(|jobs| {
                    if let Some(job) = jobs.iter_mut().find(|j| &j.id == id) {
                        job.has_applied = true;
                    }
                });
                self.notifier
                    .success(&format!("Applied for \"{}\" successfully!", title));
                true
            }
            Err(_) => {
                self.notifier.error("You have already applied for this job.");
                false
            }
        }
    }
}
