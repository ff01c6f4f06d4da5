use serde::{Deserialize, Serialize};

use super::string_or_empty;

/// Candidate profile as served by `/candidates/profile`. The backend sends
/// `null` for fields the candidate never filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ProfileRow")]
pub struct CandidateProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub industry: String,
    pub location: String,
    pub salary: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv_path: Option<String>,
}

/// Wire shape: `name` and `full_name` may both be present; `name` wins.
#[derive(Deserialize)]
struct ProfileRow {
    #[serde(default, deserialize_with = "string_or_empty")]
    name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    full_name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    email: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    phone: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    industry: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    location: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    salary: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    skills: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    experience: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    education: String,
    #[serde(default)]
    cv_path: Option<String>,
}

impl From<ProfileRow> for CandidateProfile {
    fn from(row: ProfileRow) -> Self {
        let name = if row.name.trim().is_empty() {
            row.full_name
        } else {
            row.name
        };
        CandidateProfile {
            name,
            email: row.email,
            phone: row.phone,
            industry: row.industry,
            location: row.location,
            salary: row.salary,
            skills: row.skills,
            experience: row.experience,
            education: row.education,
            cv_path: row.cv_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_fields_become_empty() {
        let profile: CandidateProfile = serde_json::from_value(json!({
            "full_name": "Sam", "email": "sam@example.com", "phone": null
        }))
        .unwrap();
        assert_eq!(profile.name, "Sam");
        assert_eq!(profile.phone, "");
        assert_eq!(profile.cv_path, None);
    }

    #[test]
    fn name_and_full_name_together_still_parse() {
        let profile: CandidateProfile = serde_json::from_value(json!({
            "name": "Sam", "full_name": "Samira Haddad", "email": "sam@example.com"
        }))
        .unwrap();
        assert_eq!(profile.name, "Sam");
    }
}
