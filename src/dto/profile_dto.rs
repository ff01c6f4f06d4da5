use serde::Serialize;
use validator::Validate;

/// Body for `PUT /candidates/profile`. Sent as JSON, or as multipart form
/// fields when a CV file accompanies it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct ProfileUpdate {
    pub name: String,
    #[validate(custom(function = "crate::utils::validation::optional_email_shape"))]
    pub email: String,
    pub phone: String,
    pub industry: String,
    pub location: String,
    pub salary: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
}

impl ProfileUpdate {
    /// Field name and value pairs in a stable order, for multipart encoding.
    pub fn fields(&self) -> [(&'static str, &str); 9] {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("industry", &self.industry),
            ("location", &self.location),
            ("salary", &self.salary),
            ("skills", &self.skills),
            ("experience", &self.experience),
            ("education", &self.education),
        ]
    }
}
