use serde_json::Value as JsonValue;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::user_dto::UserPayload;
use crate::error::Result;
use crate::models::user::User;
use crate::models::ResourceId;
use crate::services::api_client::ApiClient;

#[derive(Clone)]
pub struct UserService {
    api: ApiClient,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<User>> {
        let users: Vec<User> = self.api.get("/users").await?;
        info!(count = users.len(), "Fetched users");
        Ok(users)
    }

    #[instrument(skip(self, payload), fields(email = %payload.email))]
    pub async fn create(&self, payload: &UserPayload) -> Result<()> {
        payload.validate()?;
        let _: JsonValue = self.api.post("/users", payload).await?;
        info!("User created");
        Ok(())
    }

    #[instrument(skip(self, payload), fields(email = %payload.email))]
    pub async fn update(&self, id: &ResourceId, payload: &UserPayload) -> Result<()> {
        payload.validate()?;
        let _: JsonValue = self.api.put(&format!("/users/{}", id), payload).await?;
        info!("User updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &ResourceId) -> Result<()> {
        self.api.delete(&format!("/users/{}", id)).await?;
        info!("User deleted");
        Ok(())
    }
}
