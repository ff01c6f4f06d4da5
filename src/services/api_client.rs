use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::Config;
use crate::error::Result;
use crate::middleware::auth::{authorize, check_response};
use crate::session::Session;

/// Thin wrapper over `reqwest` for the Remote Nomads REST API.
///
/// Every request carries the session's bearer token and every failure is
/// mapped through [`check_response`].
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &Config, session: Session) -> Result<Self> {
        Self::with_timeout(config.api_base_url.clone(), config.http_timeout, session)
    }

    pub fn with_timeout(base_url: Url, timeout: Duration, session: Session) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` below the base URL, keeping any prefix such as `/api/v1`.
    pub fn url(&self, path: &str) -> Result<Url> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&joined)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.execute(self.request(Method::GET, path)?).await?;
        decode(response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(self.request(Method::POST, path)?.json(body))
            .await?;
        decode(response).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(self.request(Method::PUT, path)?.json(body))
            .await?;
        decode(response).await
    }

    /// `PUT` whose response body may legitimately be empty.
    pub async fn put_optional<B, T>(&self, path: &str, body: &B) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(self.request(Method::PUT, path)?.json(body))
            .await?;
        decode_optional(response).await
    }

    /// `POST` with no body; any response body is ignored.
    pub async fn post_empty(&self, path: &str) -> Result<()> {
        self.execute(self.request(Method::POST, path)?).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.execute(self.request(Method::DELETE, path)?).await?;
        Ok(())
    }

    pub async fn put_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        let response = self
            .execute(self.request(Method::PUT, path)?.multipart(form))
            .await?;
        decode(response).await
    }

    /// Best-effort `POST` carrying an explicit token, outside the session.
    /// The outcome is only logged; a 401 here does not touch the session.
    pub async fn post_detached(&self, path: &str, token: &str) {
        let request = match self.request(Method::POST, path) {
            Ok(request) => request.bearer_auth(token),
            Err(e) => {
                warn!(error = %e, path, "Skipping detached request");
                return;
            }
        };
        match request.send().await {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => warn!(status = response.status().as_u16(), path, "Detached request rejected"),
            Err(e) => warn!(error = %e, path, "Detached request failed"),
        }
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        Ok(self.client.request(method, self.url(path)?))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let request = authorize(request, &self.session).build()?;
        debug!(method = %request.method(), url = %request.url(), "Sending request");
        let response = self.client.execute(request).await?;
        check_response(response, &self.session).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await?;
    let body = if body.trim().is_empty() { "null" } else { body.as_str() };
    Ok(serde_json::from_str(body)?)
}

async fn decode_optional<T: DeserializeOwned>(response: Response) -> Result<Option<T>> {
    let body = response.text().await?;
    if body.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(&body)?))
}
