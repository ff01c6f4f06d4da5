use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::{string_or_empty, ResourceId};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Freelance,
    Internship,
    #[serde(untagged)]
    Other(String),
}

impl JobType {
    pub const KNOWN: [JobType; 5] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Freelance,
        JobType::Internship,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            JobType::FullTime => "full_time",
            JobType::PartTime => "part_time",
            JobType::Contract => "contract",
            JobType::Freelance => "freelance",
            JobType::Internship => "internship",
            JobType::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            JobType::FullTime => "Full Time",
            JobType::PartTime => "Part Time",
            JobType::Contract => "Contract",
            JobType::Freelance => "Freelance",
            JobType::Internship => "Internship",
            JobType::Other(raw) => raw,
        }
    }

    pub fn parse(raw: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|t| t.as_str() == raw)
            .unwrap_or_else(|| JobType::Other(raw.to_string()))
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Draft,
    Active,
    OnHold,
    Filled,
    Archived,
    #[serde(untagged)]
    Other(String),
}

impl JobStatus {
    pub const KNOWN: [JobStatus; 5] = [
        JobStatus::Draft,
        JobStatus::Active,
        JobStatus::OnHold,
        JobStatus::Filled,
        JobStatus::Archived,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Draft => "draft",
            JobStatus::Active => "active",
            JobStatus::OnHold => "on_hold",
            JobStatus::Filled => "filled",
            JobStatus::Archived => "archived",
            JobStatus::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            JobStatus::Draft => "Draft",
            JobStatus::Active => "Active",
            JobStatus::OnHold => "On Hold",
            JobStatus::Filled => "Filled",
            JobStatus::Archived => "Archived",
            JobStatus::Other(raw) => raw,
        }
    }

    pub fn parse(raw: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|s| s.as_str() == raw)
            .unwrap_or_else(|| JobStatus::Other(raw.to_string()))
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DEFAULT_LOCATION: &str = "Remote";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "JobRow")]
pub struct Job {
    pub id: ResourceId,
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub salary_range: Option<String>,
    pub description: String,
    pub industry: Option<String>,
    pub skills: Vec<String>,
    pub expiry_date: Option<String>,
    pub status: Option<JobStatus>,
    pub application_count: Option<u64>,
    pub timezone: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    /// Set locally after this session applied successfully.
    pub has_applied: bool,
}

/// Wire shape. Admin payloads say `client_name`, listings say `company`,
/// and some rows carry both; `client_name` wins.
#[derive(Deserialize)]
struct JobRow {
    id: ResourceId,
    #[serde(default, deserialize_with = "string_or_empty")]
    title: String,
    #[serde(default)]
    client_name: Option<String>,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    job_type: Option<JobType>,
    #[serde(default)]
    salary_range: Option<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    description: String,
    #[serde(default)]
    industry: Option<String>,
    #[serde(default, deserialize_with = "deserialize_skills")]
    skills: Vec<String>,
    #[serde(default)]
    expiry_date: Option<String>,
    #[serde(default)]
    status: Option<JobStatus>,
    #[serde(default)]
    application_count: Option<u64>,
    #[serde(default)]
    timezone: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_lenient")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    has_applied: bool,
    #[serde(default, rename = "hasApplied")]
    has_applied_camel: bool,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            id: row.id,
            title: row.title,
            company: row.client_name.filter(|c| !c.is_empty()).or(row.company),
            location: row.location,
            job_type: row.job_type,
            salary_range: row.salary_range,
            description: row.description,
            industry: row.industry,
            skills: row.skills,
            expiry_date: row.expiry_date,
            status: row.status,
            application_count: row.application_count,
            timezone: row.timezone,
            created_at: row.created_at,
            has_applied: row.has_applied || row.has_applied_camel,
        }
    }
}

impl Job {
    pub fn location_or_default(&self) -> &str {
        self.location
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LOCATION)
    }

    pub fn is_active(&self) -> bool {
        self.status == Some(JobStatus::Active)
    }
}

/// Skills arrive either as a JSON list or as one comma-separated string.
fn deserialize_skills<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrString {
        List(Vec<String>),
        String(String),
    }

    Ok(match Option::<ListOrString>::deserialize(deserializer)? {
        Some(ListOrString::List(items)) => items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Some(ListOrString::String(raw)) => crate::utils::text::split_list(&raw),
        None => Vec::new(),
    })
}
