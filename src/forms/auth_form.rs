use validator::{Validate, ValidationErrors};

use crate::dto::auth_dto::{LoginRequest, RegisterRequest, ResetPasswordRequest};
use crate::models::user::UserRole;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.to_request().validate()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

impl SignupForm {
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: self.role,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.to_request().validate()
    }
}

/// The token comes from the reset link; without one the form cannot submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetPasswordForm {
    pub token: Option<String>,
    pub new_password: String,
}

impl ResetPasswordForm {
    pub fn to_request(&self) -> ResetPasswordRequest {
        ResetPasswordRequest {
            token: self.token.clone().unwrap_or_default(),
            new_password: self.new_password.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.to_request().validate()
    }
}
