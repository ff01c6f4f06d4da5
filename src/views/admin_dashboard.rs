use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tokio::sync::watch;

use crate::services::dashboard_service::{DashboardService, DashboardStats};
use crate::services::notification_service::Notifier;
use crate::views::busy::Busy;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AdminTab {
    #[default]
    Users,
    Jobs,
    Candidates,
}

impl AdminTab {
    pub const ALL: [AdminTab; 3] = [AdminTab::Users, AdminTab::Jobs, AdminTab::Candidates];

    pub const fn as_str(self) -> &'static str {
        match self {
            AdminTab::Users => "users",
            AdminTab::Jobs => "jobs",
            AdminTab::Candidates => "candidates",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AdminTab::Users => "User Management",
            AdminTab::Jobs => "Job Management",
            AdminTab::Candidates => "Candidate Review",
        }
    }
}

impl fmt::Display for AdminTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdminTab::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown admin tab: {}", s))
    }
}

/// Admin landing screen: headline stats and the selected tab.
pub struct AdminDashboard {
    service: DashboardService,
    notifier: Arc<dyn Notifier>,
    tab: AdminTab,
    stats: DashboardStats,
    loading: Busy,
}

impl AdminDashboard {
    pub fn new(service: DashboardService, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            tab: AdminTab::default(),
            stats: DashboardStats::default(),
            loading: Busy::new(),
        }
    }

    pub async fn load(&mut self) -> bool {
        let _loading = self.loading.begin();
        match self.service.stats().await {
            Ok(stats) => {
                self.stats = stats;
                true
            }
            Err(e) => {
                self.notifier.failure(&e, "Failed to load dashboard");
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

    pub fn stats(&self) -> DashboardStats {
        self.stats
    }

    pub fn tab(&self) -> AdminTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: AdminTab) {
        self.tab = tab;
    }
}
