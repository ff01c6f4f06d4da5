use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Mirrors `^[^\s@]+@[^\s@]+\.[^\s@]+$`.
pub fn is_email_shaped(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub fn email_shape(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "Email is required"));
    }
    if is_email_shaped(value) {
        Ok(())
    } else {
        Err(error("email", "Please enter a valid email"))
    }
}

/// Like [`email_shape`] but an empty value is accepted.
pub fn optional_email_shape(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Ok(())
    } else {
        email_shape(value)
    }
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("required"))
    } else {
        Ok(())
    }
}

pub fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Collect the result of a derived validation so extra checks can be added.
pub fn into_errors(result: Result<(), ValidationErrors>) -> ValidationErrors {
    result.err().unwrap_or_else(ValidationErrors::new)
}

pub fn finish(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape_matches_form_rule() {
        assert!(is_email_shaped("a@b.co"));
        assert!(is_email_shaped("first.last@sub.domain.io"));
        assert!(!is_email_shaped("a@b"));
        assert!(!is_email_shaped("a@.com"));
        assert!(!is_email_shaped("a@b."));
        assert!(is_email_shaped("a@b.c."));
        assert!(!is_email_shaped("@b.com"));
        assert!(!is_email_shaped("a b@c.com"));
        assert!(!is_email_shaped("a@b@c.com"));
    }
}
