pub mod api_client;
pub mod application_service;
pub mod auth_service;
pub mod dashboard_service;
pub mod export_service;
pub mod job_service;
pub mod notification_service;
pub mod profile_service;
pub mod user_service;
