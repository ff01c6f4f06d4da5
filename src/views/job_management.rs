use std::sync::Arc;

use tokio::sync::watch;

use crate::forms::job_form::JobForm;
use crate::models::job::Job;
use crate::models::ResourceId;
use crate::services::job_service::JobService;
use crate::services::notification_service::Notifier;
use crate::views::busy::Busy;
use crate::views::listing::{ListSpec, ListView};

pub struct JobManagementListing;

impl ListSpec for JobManagementListing {
    type Item = Job;
    type Filter = ();
    type Sort = ();

    fn search_fields(item: &Job) -> Vec<Option<&str>> {
        vec![
            Some(item.title.as_str()),
            item.company.as_deref(),
            item.industry.as_deref(),
        ]
    }
}

/// Admin job CRUD. Every successful mutation is followed by a refetch.
pub struct JobManagement {
    service: JobService,
    notifier: Arc<dyn Notifier>,
    list: ListView<JobManagementListing>,
    loading: Busy,
}

impl JobManagement {
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

    pub fn visible(&self) -> Vec<&Job> {
        self.list.visible().collect()
    }

    pub fn find(&self, id: &ResourceId) -> Option<&Job> {
        self.list.items().iter().find(|j| &j.id == id)
    }

    pub async fn save(&mut self, form: &JobForm) -> bool {
        let editing = !form.mode.is_create();
        match form.submit(&self.service).await {
            Ok(()) => {
                self.notifier.success(if editing {
                    "Job updated successfully"
                } else {
                    "Job created successfully"
                });
                self.load().await;
                true
            }
            Err(e) => {
                self.notifier.failure(&e, "Failed to save job");
                false
            }
        }
    }

    pub async fn delete(&mut self, id: &ResourceId) -> bool {
        match self.service.delete(id).await {
            Ok(()) => {
                self.notifier.success("Job deleted successfully");
                self.load().await;
                true
            }
            Err(e) => {
                self.notifier.failure(&e, "Failed to delete job");
                false
            }
        }
    }
}
