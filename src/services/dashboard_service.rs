use serde::Serialize;
use tracing::{info, instrument};

use crate::error::Result;
use crate::models::application::Application;
use crate::models::job::Job;
use crate::models::user::User;
use crate::services::application_service::ApplicationService;
use crate::services::job_service::JobService;
use crate::services::user_service::UserService;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_users: usize,
    pub active_jobs: usize,
    pub applications: usize,
    /// Applications per job, as a rounded percentage.
    pub fill_rate: u64,
}

impl DashboardStats {
    pub fn compute(users: &[User], jobs: &[Job], applications: &[Application]) -> Self {
        let fill_rate = if jobs.is_empty() {
            0
        } else {
            (applications.len() as f64 / jobs.len() as f64 * 100.0).round() as u64
        };
        Self {
            total_users: users.len(),
            active_jobs: jobs.iter().filter(|j| j.is_active()).count(),
            applications: applications.len(),
            fill_rate,
        }
    }
}

#[derive(Clone)]
pub struct DashboardService {
    users: UserService,
    jobs: JobService,
    applications: ApplicationService,
}

impl DashboardService {
    pub fn new(users: UserService, jobs: JobService, applications: ApplicationService) -> Self {
        Self {
            users,
            jobs,
            applications,
        }
    }

    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<DashboardStats> {
        let (users, jobs, applications) = tokio::try_join!(
            self.users.list(),
            self.jobs.list(),
            self.applications.list()
        )?;
        let stats = DashboardStats::compute(&users, &jobs, &applications);
        info!(?stats, "Dashboard stats computed");
        Ok(stats)
    }
}
