use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{string_or_empty, ResourceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Recruiter,
    #[default]
    Candidate,
}

impl UserRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Recruiter => "recruiter",
            UserRole::Candidate => "candidate",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            UserRole::Admin => "Full access to all system features, including user management, job postings, and system settings.",
            UserRole::Recruiter => "Can post jobs, review applications, and manage candidate pipelines. Cannot manage system users.",
            UserRole::Candidate => "Can apply for jobs, update profile, and track applications. Limited to personal account management.",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "recruiter" => Ok(UserRole::Recruiter),
            "candidate" => Ok(UserRole::Candidate),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

impl UserStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "pending" => Ok(UserStatus::Pending),
            other => Err(format!("unknown user status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "UserRow")]
pub struct User {
    pub id: ResourceId,
    pub full_name: String,
    pub email: String,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}

/// Wire shape: `full_name` and the older `name` may both be present.
#[derive(Deserialize)]
struct UserRow {
    id: ResourceId,
    #[serde(default, deserialize_with = "string_or_empty")]
    full_name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    email: String,
    #[serde(default)]
    role: Option<UserRole>,
    #[serde(default)]
    status: Option<UserStatus>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        let full_name = if row.full_name.trim().is_empty() {
            row.name
        } else {
            row.full_name
        };
        User {
            id: row.id,
            full_name,
            email: row.email,
            role: row.role,
            status: row.status,
        }
    }
}

impl User {
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            "Unnamed User"
        } else {
            &self.full_name
        }
    }

    pub fn initial(&self) -> char {
        self.full_name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('U')
    }
}

/// Signed-in user summary persisted alongside the bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    pub role: UserRole,
    pub name: String,
}

impl SessionUser {
    /// The login response carries no display name, so the local part of the
    /// email stands in for it.
    pub fn from_login(email: &str, role: UserRole) -> Self {
        let name = email.split('@').next().unwrap_or(email).to_string();
        Self {
            email: email.to_string(),
            role,
            name,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_accepts_name_alias() {
        let user: User = serde_json::from_value(json!({
            "id": 7, "name": "Ada Lovelace", "email": "ada@example.com", "role": "recruiter"
        }))
        .unwrap();
        assert_eq!(user.full_name, "Ada Lovelace");
        assert_eq!(user.role, Some(UserRole::Recruiter));
        assert_eq!(user.initial(), 'A');
    }

    #[test]
    fn both_name_spellings_prefer_full_name() {
        let user: User = serde_json::from_value(json!({
            "id": 8, "full_name": "Grace Hopper", "name": "grace", "email": "grace@example.com"
        }))
        .unwrap();
        assert_eq!(user.full_name, "Grace Hopper");

        let blank: User = serde_json::from_value(json!({
            "id": 9, "full_name": null, "name": "Alan Turing"
        }))
        .unwrap();
        assert_eq!(blank.full_name, "Alan Turing");
    }

    #[test]
    fn session_user_name_is_email_local_part() {
        let user = SessionUser::from_login("jane.doe@nomads.io", UserRole::Candidate);
        assert_eq!(user.name, "jane.doe");
        assert!(!user.is_admin());
    }
}
