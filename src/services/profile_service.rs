use std::path::Path;

use reqwest::multipart::{Form, Part};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::profile_dto::ProfileUpdate;
use crate::error::{Error, Result};
use crate::models::profile::CandidateProfile;
use crate::services::api_client::ApiClient;

const PROFILE_PATH: &str = "/candidates/profile";

/// A CV file to send with a profile update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvUpload {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl CvUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name);
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::Internal(format!("Not a file path: {}", path.display())))?
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(file_name, bytes))
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

#[derive(Clone)]
pub struct ProfileService {
    api: ApiClient,
}

impl ProfileService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[instrument(skip(self))]
    pub async fn get(&self) -> Result<CandidateProfile> {
        self.api.get(PROFILE_PATH).await
    }

    /// Save the profile. With a CV the update goes out as multipart form
    /// data with the file in the `cv` part; otherwise as JSON.
    #[instrument(skip(self, update, cv), fields(with_cv = cv.is_some()))]
    pub async fn update(
        &self,
        update: &ProfileUpdate,
        cv: Option<CvUpload>,
    ) -> Result<Option<CandidateProfile>> {
        update.validate()?;
        let saved = match cv {
            None => self.api.put(PROFILE_PATH, update).await?,
            Some(cv) => {
                let form = multipart_form(update, cv)?;
                self.api.put_multipart(PROFILE_PATH, form).await?
            }
        };
        info!("Profile updated");
        Ok(saved)
    }
}

fn multipart_form(update: &ProfileUpdate, cv: CvUpload) -> Result<Form> {
    let mut form = Form::new();
    for (name, value) in update.fields() {
        form = form.text(name, value.to_string());
    }
    let part = Part::bytes(cv.bytes)
        .file_name(cv.file_name)
        .mime_str(cv.content_type)?;
    Ok(form.part("cv", part))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(CvUpload::new("cv.PDF", vec![]).content_type, "application/pdf");
        assert_eq!(
            CvUpload::new("resume.docx", vec![]).content_type,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(CvUpload::new("notes", vec![]).content_type, "application/octet-stream");
    }
}
