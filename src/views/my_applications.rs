use std::cmp::Ordering;
use std::sync::Arc;

use tokio::sync::watch;

use serde::Serialize;

use crate::error::Result;
use crate::models::application::{Application, ApplicationStatus};
use crate::services::application_service::ApplicationService;
use crate::services::export_service::ExportService;
use crate::services::notification_service::Notifier;
use crate::views::busy::Busy;
use crate::views::listing::{ListSpec, ListView};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApplicationSort {
    #[default]
    Newest,
    Oldest,
    Title,
}

impl std::str::FromStr for ApplicationSort {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "newest" => Ok(ApplicationSort::Newest),
            "oldest" => Ok(ApplicationSort::Oldest),
            "title" => Ok(ApplicationSort::Title),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

pub struct MyApplicationsListing;

impl ListSpec for MyApplicationsListing {
    type Item = Application;
    type Filter = Option<ApplicationStatus>;
    type Sort = ApplicationSort;

    fn search_fields(item: &Application) -> Vec<Option<&str>> {
        vec![Some(item.job_title.as_str()), item.company.as_deref()]
    }

    fn matches_filter(item: &Application, filter: &Self::Filter) -> bool {
        filter.map_or(true, |status| item.status == status)
    }

    // Undated rows go last in both date orders.
    fn compare(a: &Application, b: &Application, sort: ApplicationSort) -> Ordering {
        match sort {
            ApplicationSort::Newest => match (a.applied_at, b.applied_at) {
                (Some(x), Some(y)) => y.cmp(&x),
                (x, y) => y.is_some().cmp(&x.is_some()),
            },
            ApplicationSort::Oldest => match (a.applied_at, b.applied_at) {
                (Some(x), Some(y)) => x.cmp(&y),
                (x, y) => y.is_some().cmp(&x.is_some()),
            },
            ApplicationSort::Title => a
                .job_title
                .to_lowercase()
                .cmp(&b.job_title.to_lowercase()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationStats {
    pub total: usize,
    /// Not yet decided either way.
    pub active: usize,
    /// Past the first look: reviewed or shortlisted.
    pub in_progress: usize,
    /// Accepted share of all applications, as a rounded percentage.
    pub success_rate: u64,
}

impl ApplicationStats {
    pub fn compute(applications: &[Application]) -> Self {
        use ApplicationStatus::*;
        let total = applications.len();
        let count = |pred: fn(ApplicationStatus) -> bool| {
            applications.iter().filter(|a| pred(a.status)).count()
        };
        let accepted = count(|s| s == Accepted);
        Self {
            total,
            active: count(|s| !matches!(s, Accepted | Rejected)),
            in_progress: count(|s| matches!(s, Reviewed | Shortlisted)),
            success_rate: if total == 0 {
                0
            } else {
                (accepted as f64 / total as f64 * 100.0).round() as u64
            },
        }
    }
}

/// Candidate screen listing their own applications.
pub struct MyApplications {
    service: ApplicationService,
    notifier: Arc<dyn Notifier>,
    list: ListView<MyApplicationsListing>,
    loading: Busy,
}

impl MyApplications {
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

    pub fn set_sort(&mut self, sort: ApplicationSort) {
        self.list.set_sort(sort);
    }

    pub fn visible(&self) -> Vec<&Application> {
        self.list.visible().collect()
    }

    pub fn stats(&self) -> ApplicationStats {
        ApplicationStats::compute(self.list.items())
    }

    /// CSV of every application, regardless of the current filter.
    pub fn export_csv(&self) -> Result<Vec<u8>> {
        let bytes = ExportService::generate_applications_csv(self.list.items())?;
        self.notifier.success("Applications exported successfully");
        Ok(bytes)
    }
}
