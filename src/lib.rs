pub mod config;
pub mod dto;
pub mod error;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod utils;
pub mod views;

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::models::ResourceId;
use crate::services::{
    api_client::ApiClient, application_service::ApplicationService,
    auth_service::AuthService, dashboard_service::DashboardService, job_service::JobService,
    notification_service::Notifier, profile_service::ProfileService,
    user_service::UserService,
};
use crate::session::{FileSessionStore, Session, SessionStore};
use crate::views::{
    admin_dashboard::AdminDashboard, job_board::JobBoard, job_details::JobDetails,
    job_management::JobManagement, my_applications::MyApplications, review::ReviewBoard,
    user_management::UserManagement,
};

/// Everything a front end needs, wired once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub session: Session,
    pub notifier: Arc<dyn Notifier>,
    pub api: ApiClient,
    pub auth_service: AuthService,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub user_service: UserService,
    pub profile_service: ProfileService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    /// Session persisted in the configured file.
    pub fn new(config: Config, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let store = Arc::new(FileSessionStore::new(config.session_file.clone()));
        Self::with_store(config, store, notifier)
    }

    pub fn with_store(
        config: Config,
        store: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let session = Session::init(store)?;
        let api = ApiClient::new(&config, session.clone())?;

        let auth_service = AuthService::new(api.clone());
        let job_service = JobService::new(api.clone());
        let application_service = ApplicationService::new(api.clone());
        let user_service = UserService::new(api.clone());
        let profile_service = ProfileService::new(api.clone());
        let dashboard_service = DashboardService::new(
            user_service.clone(),
            job_service.clone(),
            application_service.clone(),
        );

        Ok(Self {
            config,
            session,
            notifier,
            api,
            auth_service,
            job_service,
            application_service,
            user_service,
            profile_service,
            dashboard_service,
        })
    }

    pub fn review_board(&self) -> ReviewBoard {
        ReviewBoard::new(self.application_service.clone(), self.notifier.clone())
    }

    pub fn job_board(&self) -> JobBoard {
        JobBoard::new(self.job_service.clone(), self.notifier.clone())
    }

    pub fn job_details(&self, id: ResourceId) -> JobDetails {
        JobDetails::new(
            id,
            self.job_service.clone(),
            self.session.store().clone(),
            self.notifier.clone(),
        )
    }

    pub fn job_management(&self) -> JobManagement {
        JobManagement::new(self.job_service.clone(), self.notifier.clone())
    }

    pub fn user_management(&self) -> UserManagement {
        UserManagement::new(self.user_service.clone(), self.notifier.clone())
    }

    pub fn my_applications(&self) -> MyApplications {
        MyApplications::new(self.application_service.clone(), self.notifier.clone())
    }

    pub fn admin_dashboard(&self) -> AdminDashboard {
        AdminDashboard::new(self.dashboard_service.clone(), self.notifier.clone())
    }
}
