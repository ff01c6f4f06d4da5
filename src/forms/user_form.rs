use validator::{Validate, ValidationErrors};

use super::FormMode;
use crate::dto::user_dto::UserPayload;
use crate::error::Result;
use crate::models::user::{User, UserRole, UserStatus};
use crate::services::user_service::UserService;
use crate::utils::text::non_blank;
use crate::utils::validation::{error, finish, into_errors};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForm {
    pub mode: FormMode,
    pub full_name: String,
    pub email: String,
    /// Required when creating; left blank on edit to keep the current one.
    pub password: String,
    pub role: UserRole,
    pub status: UserStatus,
}

impl UserForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit(user: &User) -> Self {
        Self {
            mode: FormMode::Edit(user.id.clone()),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            password: String::new(),
            role: user.role.unwrap_or_default(),
            status: user.status.unwrap_or_default(),
        }
    }

    pub fn to_payload(&self) -> UserPayload {
        UserPayload {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: non_blank(&self.password).map(|_| self.password.clone()),
            role: self.role,
            status: self.status,
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.check(&self.to_payload())
    }

    pub async fn submit(&self, service: &UserService) -> Result<()> {
        let payload = self.to_payload();
        self.check(&payload)?;
        match &self.mode {
            FormMode::Create => service.create(&payload).await,
            FormMode::Edit(id) => service.update(id, &payload).await,
        }
    }

    fn check(&self, payload: &UserPayload) -> std::result::Result<(), ValidationErrors> {
        let mut errors = into_errors(payload.validate());
        if self.mode.is_create() && payload.password.is_none() {
            errors.add("password", error("required", "Password is required"));
        }
        finish(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceId;

    fn filled() -> UserForm {
        UserForm {
            full_name: "Omar Haddad".into(),
            email: "omar@nomads.io".into(),
            ..UserForm::new()
        }
    }

    #[test]
    fn password_required_on_create_only() {
        let create = filled();
        let errors = create.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));

        let edit = UserForm {
            mode: FormMode::Edit(ResourceId::from("9")),
            ..filled()
        };
        assert!(edit.validate().is_ok());
        assert_eq!(edit.to_payload().password, None);
    }

    #[test]
    fn short_password_and_bad_email_are_reported() {
        let form = UserForm {
            email: "omar@nomads".into(),
            password: "12345".into(),
            ..filled()
        };
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }
}
