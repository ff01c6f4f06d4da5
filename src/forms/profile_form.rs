use validator::{Validate, ValidationErrors};

use crate::dto::profile_dto::ProfileUpdate;
use crate::models::profile::CandidateProfile;

/// Editable copy of the candidate profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub update: ProfileUpdate,
}

impl ProfileForm {
    pub fn from_profile(profile: &CandidateProfile) -> Self {
        Self {
            update: ProfileUpdate {
                name: profile.name.clone(),
                email: profile.email.clone(),
                phone: profile.phone.clone(),
                industry: profile.industry.clone(),
                location: profile.location.clone(),
                salary: profile.salary.clone(),
                skills: profile.skills.clone(),
                experience: profile.experience.clone(),
                education: profile.education.clone(),
            },
        }
    }

    /// Set one field by its wire name. Unknown names are ignored and
    /// reported as `false`.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        let slot = match field {
            "name" => &mut self.update.name,
            "email" => &mut self.update.email,
            "phone" => &mut self.update.phone,
            "industry" => &mut self.update.industry,
            "location" => &mut self.update.location,
            "salary" => &mut self.update.salary,
            "skills" => &mut self.update.skills,
            "experience" => &mut self.update.experience,
            "education" => &mut self.update.education,
            _ => return false,
        };
        *slot = value.into();
        true
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.update.validate()
    }
}
