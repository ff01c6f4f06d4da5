use reqwest::{header, RequestBuilder, Response, StatusCode};
use tracing::warn;

use crate::error::{Error, Result};
use crate::session::{Session, TeardownReason};

/// Attach `Authorization: Bearer <token>` when the session holds a token.
pub fn authorize(request: RequestBuilder, session: &Session) -> RequestBuilder {
    match session.token() {
        Some(token) => request.header(header::AUTHORIZATION, format!("Bearer {}", token)),
        None => request,
    }
}

/// Pass successful responses through; turn the rest into [`Error`].
///
/// A 401 means the token is no longer accepted: the session is torn down
/// before the error is returned, so subscribers route to the login screen.
pub async fn check_response(response: Response, session: &Session) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    if status == StatusCode::UNAUTHORIZED {
        warn!(%url, "Backend rejected the session token");
        session.teardown(TeardownReason::Expired);
    } else {
        warn!(%url, status = status.as_u16(), "Request failed");
    }
    Err(Error::from_response(status, &body))
}
