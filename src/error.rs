use reqwest::StatusCode;
use serde_json::Value as JsonValue;

use crate::models::application::ApplicationStatus;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Cannot move application from {from} to {to}")]
    IllegalTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel export error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification used by views to decide how a failure is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Unauthorized,
    Validation,
    NotFound,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Http(_) => ErrorKind::Network,
            Error::Unauthorized(_) => ErrorKind::Unauthorized,
            Error::BadRequest(_) | Error::Validation(_) | Error::IllegalTransition { .. } => {
                ErrorKind::Validation
            }
            Error::NotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Internal,
        }
    }

    /// Build an error from a non-success API response.
    ///
    /// The backend reports failures as `{"detail": "..."}` or, for request
    /// validation, `{"detail": [{"msg": "..."}, ...]}`. The first message is
    /// surfaced verbatim; anything else falls back to the status reason.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = extract_detail(body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string()
        });

        match status {
            StatusCode::UNAUTHORIZED => Error::Unauthorized(message),
            StatusCode::NOT_FOUND => Error::NotFound(message),
            s if s.is_client_error() => Error::BadRequest(message),
            s => Error::Server {
                status: s.as_u16(),
                message,
            },
        }
    }

    /// Text shown to the user in a transient notification.
    pub fn user_message(&self) -> String {
        match self {
            Error::BadRequest(msg) | Error::NotFound(msg) => msg.clone(),
            Error::Unauthorized(_) => "Your session has expired. Please log in again.".to_string(),
            Error::Validation(errors) => first_validation_message(errors),
            Error::Http(_) => "Network error. Please check your connection.".to_string(),
            other => other.to_string(),
        }
    }
}

fn extract_detail(body: &str) -> Option<String> {
    let value: JsonValue = serde_json::from_str(body).ok()?;
    let detail = value.get("detail").or_else(|| value.get("error"))?;
    match detail {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Array(items) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(|m| m.as_str()))
            .map(str::to_string),
        _ => None,
    }
}

fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);
    fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .unwrap_or_else(|| "Please check the form".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_is_surfaced_verbatim() {
        let err = Error::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"detail":"You have already applied for this job"}"#,
        );
        assert!(matches!(err, Error::BadRequest(ref m) if m == "You have already applied for this job"));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn detail_list_uses_first_message() {
        let err = Error::from_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email"}]}"#,
        );
        assert_eq!(err.user_message(), "value is not a valid email");
    }

    #[test]
    fn status_codes_map_onto_taxonomy() {
        assert_eq!(
            Error::from_response(StatusCode::UNAUTHORIZED, "").kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(
            Error::from_response(StatusCode::NOT_FOUND, "").kind(),
            ErrorKind::NotFound
        );
        let server = Error::from_response(StatusCode::BAD_GATEWAY, "<html>");
        assert!(matches!(server, Error::Server { status: 502, ref message } if message == "Bad Gateway"));
    }
}
