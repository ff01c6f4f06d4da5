use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use crate::error::Error;
use crate::models::application::{Application, ApplicationStatus, ReviewAction, StatusCounts};
use crate::models::ResourceId;
use crate::services::application_service::ApplicationService;
use crate::services::export_service::ExportService;
use crate::services::notification_service::Notifier;
use crate::views::busy::Busy;
use crate::views::listing::{ListSpec, ListView};

pub struct ReviewListing;

impl ListSpec for ReviewListing {
    type Item = Application;
    /// `None` shows every status.
    type Filter = Option<ApplicationStatus>;
    type Sort = ();

    fn search_fields(item: &Application) -> Vec<Option<&str>> {
        vec![
            item.candidate_name.as_deref(),
            item.candidate_email.as_deref(),
            Some(item.job_title.as_str()),
        ]
    }

    fn matches_filter(item: &Application, filter: &Self::Filter) -> bool {
        filter.map_or(true, |status| item.status == status)
    }
}

/// Reviewer screen: every application, searchable, filterable by status,
/// with the workflow actions for each row.
pub struct ReviewBoard {
    service: ApplicationService,
    notifier: Arc<dyn Notifier>,
    list: ListView<ReviewListing>,
    loading: Busy,
}

impl ReviewBoard {
    pub fn new(service: ApplicationService, notifier: Arc<dyn Notifier>) -> Self {
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
            Ok(applications) => {
                self.list.set_items(applications);
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to load applications");
                self.notifier.failure(&e, "Failed to load applications");
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

    pub fn set_status_filter(&mut self, status: Option<ApplicationStatus>) {
        self.list.set_filter(status);
    }

    pub fn visible(&self) -> Vec<&Application> {
        self.list.visible().collect()
    }

    pub fn applications(&self) -> &[Application] {
        self.list.items()
    }

    pub fn get(&self, id: &ResourceId) -> Option<&Application> {
        self.list.items().iter().find(|a| &a.id == id)
    }

    /// Tally over the whole collection, independent of search and filter.
    pub fn counts(&self) -> StatusCounts {
        StatusCounts::from_applications(self.list.items())
    }

    pub fn actions_for(&self, id: &ResourceId) -> Vec<ReviewAction> {
        self.get(id).map(|a| a.status.actions()).unwrap_or_default()
    }

    /// Move one application to `target`. The in-memory row changes only
    /// after the backend accepted the update.
    pub async fn transition(&mut self, id: &ResourceId, target: ApplicationStatus) -> bool {
        let Some(current) = self.get(id).cloned() else {
            self.notifier.error("Application not found");
            return false;
        };

        match self.service.transition(&current, target).await {
            Ok(updated) => {
                self.list.update(|items| {
                    if let Some(slot) = items.iter_mut().find(|a| a.id == updated.id) {
                        *slot = updated;
                    }
                });
                self.notifier
                    .success(&format!("Application marked as {}", target));
                true
            }
            Err(e @ Error::IllegalTransition { .. }) => {
                self.notifier.error(&e.to_string());
                false
            }
            Err(e) => {
                warn!(error = %e, %id, "Status update failed");
                self.notifier
                    .failure(&e, "Failed to update application status");
                false
            }
        }
    }

    /// XLSX workbook of the rows currently shown.
    pub fn export_xlsx(&self) -> crate::error::Result<Vec<u8>> {
        let rows: Vec<Application> = self.list.visible().cloned().collect();
        ExportService::generate_applications_xlsx(&rows)
    }
}
