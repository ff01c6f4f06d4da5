//! Editable drafts for the create/edit screens.
//!
//! A draft is validated before anything goes over the wire; a draft that
//! fails validation never produces a request.

pub mod auth_form;
pub mod job_form;
pub mod profile_form;
pub mod user_form;

use crate::models::ResourceId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit(ResourceId),
}

impl FormMode {
    pub fn is_create(&self) -> bool {
        matches!(self, FormMode::Create)
    }
}
