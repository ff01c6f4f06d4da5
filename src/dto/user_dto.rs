use serde::Serialize;
use validator::Validate;

use crate::models::user::{UserRole, UserStatus};

/// Body for `POST /users` and `PUT /users/:id`. The password is only sent
/// when one was entered.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct UserPayload {
    #[validate(custom(function = "crate::utils::validation::not_blank", message = "Full name is required"))]
    pub full_name: String,
    #[validate(custom(function = "crate::utils::validation::email_shape"))]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
}
