use validator::{Validate, ValidationErrors};

use super::FormMode;
use crate::dto::job_dto::JobPayload;
use crate::error::Result;
use crate::models::job::{Job, JobStatus, JobType, DEFAULT_LOCATION};
use crate::services::job_service::JobService;
use crate::utils::text::{non_blank, split_list};

/// Draft job posting. `skills` is edited as one comma-separated string.
#[derive(Debug, Clone, PartialEq)]
pub struct JobForm {
    pub mode: FormMode,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    pub salary_range: String,
    pub description: String,
    pub industry: String,
    pub skills: String,
    pub expiry_date: String,
    pub status: JobStatus,
    pub timezone: String,
}

impl Default for JobForm {
    fn default() -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            company: String::new(),
            location: DEFAULT_LOCATION.to_string(),
            job_type: JobType::FullTime,
            salary_range: String::new(),
            description: String::new(),
            industry: String::new(),
            skills: String::new(),
            expiry_date: String::new(),
            status: JobStatus::Draft,
            timezone: String::new(),
        }
    }
}

impl JobForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit(job: &Job) -> Self {
        Self {
            mode: FormMode::Edit(job.id.clone()),
            title: job.title.clone(),
            company: job.company.clone().unwrap_or_default(),
            location: job.location_or_default().to_string(),
            job_type: job.job_type.clone().unwrap_or_default(),
            salary_range: job.salary_range.clone().unwrap_or_default(),
            description: job.description.clone(),
            industry: job.industry.clone().unwrap_or_default(),
            skills: job.skills.join(", "),
            expiry_date: job.expiry_date.clone().unwrap_or_default(),
            status: job.status.clone().unwrap_or_default(),
            timezone: job.timezone.clone().unwrap_or_default(),
        }
    }

    pub fn to_payload(&self) -> JobPayload {
        JobPayload {
            title: self.title.trim().to_string(),
            company: non_blank(&self.company),
            location: non_blank(&self.location).unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            job_type: self.job_type.clone(),
            salary_range: non_blank(&self.salary_range),
            description: self.description.trim().to_string(),
            industry: non_blank(&self.industry),
            skills: split_list(&self.skills),
            expiry_date: non_blank(&self.expiry_date),
            status: self.status.clone(),
            timezone: non_blank(&self.timezone),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.to_payload().validate()
    }

    /// Create or update, depending on the mode. One request at most.
    pub async fn submit(&self, service: &JobService) -> Result<()> {
        let payload = self.to_payload();
        payload.validate()?;
        match &self.mode {
            FormMode::Create => service.create(&payload).await,
            FormMode::Edit(id) => service.update(id, &payload).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_new_posting() {
        let form = JobForm::new();
        assert_eq!(form.location, "Remote");
        assert_eq!(form.job_type, JobType::FullTime);
        assert_eq!(form.status, JobStatus::Draft);
    }

    #[test]
    fn blank_title_is_rejected() {
        let form = JobForm {
            title: "   ".into(),
            ..JobForm::new()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn skills_are_split_on_submit() {
        let form = JobForm {
            title: "Platform Engineer".into(),
            skills: "Rust, , Kubernetes ,".into(),
            location: "  ".into(),
            ..JobForm::new()
        };
        let payload = form.to_payload();
        assert_eq!(payload.skills, vec!["Rust", "Kubernetes"]);
        assert_eq!(payload.location, "Remote");
        assert!(form.validate().is_ok());
    }
}
