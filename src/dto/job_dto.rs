use serde::Serialize;
use validator::Validate;

use crate::models::job::{JobStatus, JobType};

/// Body for `POST /jobs` and `PUT /jobs/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct JobPayload {
    #[validate(custom(function = "crate::utils::validation::not_blank", message = "Job title is required"))]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub location: String,
    pub job_type: JobType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}
