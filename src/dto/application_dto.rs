use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::models::application::{Application, ApplicationStatus};
use crate::models::ResourceId;
use crate::utils::time::deserialize_lenient;

/// Placeholder shown when the backend omits the job title.
pub const MISSING_TITLE: &str = "N/A";

/// Application row as the backend sends it. Reviewer and candidate listings
/// use different field names for the same data, so both are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "ApplicationRow")]
pub struct RawApplication {
    pub id: ResourceId,
    pub job_id: Option<ResourceId>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub candidate_name: Option<String>,
    pub candidate_email: Option<String>,
    pub applied_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Kept raw: non-string values must normalize instead of failing the row.
    pub status: JsonValue,
    pub cv_path: Option<String>,
}

/// Every spelling in its own slot, so a row carrying two of them still
/// parses. The reviewer spelling wins when both are present.
#[derive(Deserialize)]
struct ApplicationRow {
    #[serde(default)]
    application_id: Option<ResourceId>,
    #[serde(default)]
    id: Option<ResourceId>,
    #[serde(default)]
    job_id: Option<ResourceId>,
    #[serde(default)]
    job_title: Option<String>,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    candidate_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    candidate_email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    applied_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    status: JsonValue,
    #[serde(default)]
    cv_path: Option<String>,
}

impl TryFrom<ApplicationRow> for RawApplication {
    type Error = String;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let id = row
            .application_id
            .or(row.id)
            .ok_or_else(|| "application row has no id".to_string())?;
        Ok(RawApplication {
            id,
            job_id: row.job_id,
            job_title: row.job_title,
            company: row.company,
            location: row.location,
            candidate_name: row.full_name.or(row.candidate_name),
            candidate_email: row.email.or(row.candidate_email),
            applied_at: row.applied_at.or(row.created_at),
            updated_at: row.updated_at,
            status: row.status,
            cv_path: row.cv_path,
        })
    }
}

impl From<RawApplication> for Application {
    fn from(raw: RawApplication) -> Self {
        Application {
            id: raw.id,
            job_id: raw.job_id,
            job_title: raw
                .job_title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| MISSING_TITLE.to_string()),
            company: raw.company,
            location: raw.location,
            candidate_name: raw.candidate_name,
            candidate_email: raw.candidate_email,
            applied_at: raw.applied_at,
            updated_at: raw.updated_at,
            status: ApplicationStatus::normalize(raw.status.as_str()),
            cv_path: raw.cv_path.filter(|p| !p.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplyRequest {
    pub job_id: ResourceId,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
}
