use tracing::{info, instrument};
use validator::Validate;

use crate::dto::auth_dto::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, ResetPasswordRequest,
};
use crate::error::{Error, Result};
use crate::models::user::SessionUser;
use crate::services::api_client::ApiClient;
use crate::session::TeardownReason;

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for a token and persist the session.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> Result<SessionUser> {
        request.validate()?;
        // A 401 here means bad credentials, not an expired session.
        let response: LoginResponse = match self.api.post("/auth/login", &request).await {
            Err(Error::Unauthorized(message)) => return Err(Error::BadRequest(message)),
            other => other?,
        };
        let user = SessionUser::from_login(&request.email, response.role);
        self.api
            .session()
            .establish(response.access_token, user.clone())?;
        info!(role = %user.role, "Logged in");
        Ok(user)
    }

    /// Clear the local session, then tell the backend. The backend call
    /// cannot fail the logout.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        let token = self.api.session().token();
        self.api.session().teardown(TeardownReason::Logout);
        if let Some(token) = token {
            self.api.post_detached("/auth/logout", &token).await;
        }
    }

    #[instrument(skip(self, request), fields(email = %request.email, role = %request.role))]
    pub async fn register(&self, request: RegisterRequest) -> Result<Option<String>> {
        request.validate()?;
        let response: Option<MessageResponse> = self.api.post("/auth/register", &request).await?;
        info!("Account registered");
        Ok(response.and_then(|r| r.message))
    }

    #[instrument(skip(self, request))]
    pub async fn reset_password(&self, request: ResetPasswordRequest) -> Result<Option<String>> {
        request.validate()?;
        let response: Option<MessageResponse> =
            self.api.post("/auth/reset-password", &request).await?;
        Ok(response.and_then(|r| r.message))
    }
}
