use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::UserRole;

#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(custom(function = "crate::utils::validation::email_shape"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(custom(function = "crate::utils::validation::not_blank", message = "Full name is required"))]
    pub full_name: String,
    #[validate(custom(function = "crate::utils::validation::email_shape"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(custom(function = "crate::utils::validation::not_blank", message = "Reset token is missing"))]
    pub token: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
}

/// Acknowledgement bodies vary between endpoints; only `message` is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}
