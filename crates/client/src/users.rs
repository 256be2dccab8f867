//! User endpoints.

use plm_core::types::DbId;
use plm_core::user::{PasswordChange, User, UserInput};

use crate::error::ApiError;
use crate::http::ApiClient;

impl ApiClient {
    /// Sends `GET /users`.
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get("/users").await
    }

    /// Sends `GET /users/{id}`.
    pub async fn get_user(&self, id: DbId) -> Result<User, ApiError> {
        self.get(&format!("/users/{id}")).await
    }

    /// Sends `POST /users`.
    pub async fn create_user(&self, input: &UserInput) -> Result<User, ApiError> {
        self.post("/users", input).await
    }

    /// Sends `PUT /users/{id}`.
    pub async fn update_user(&self, id: DbId, input: &UserInput) -> Result<User, ApiError> {
        self.put(&format!("/users/{id}"), input).await
    }

    /// Change a user's password. Sends `PUT /users/{id}/password`; the
    /// response body, if any, is ignored.
    pub async fn update_password(&self, id: DbId, change: &PasswordChange) -> Result<(), ApiError> {
        self.put_discard(&format!("/users/{id}/password"), change)
            .await
    }
}
