//! Status catalogue endpoints.

use plm_core::status::{Status, StatusInput};
use plm_core::types::DbId;

use crate::error::ApiError;
use crate::http::ApiClient;

impl ApiClient {
    /// List every status. Sends `GET /statuses`.
    pub async fn list_statuses(&self) -> Result<Vec<Status>, ApiError> {
        self.get("/statuses").await
    }

    /// Sends `GET /statuses/{id}`.
    pub async fn get_status(&self, id: DbId) -> Result<Status, ApiError> {
        self.get(&format!("/statuses/{id}")).await
    }

    /// List statuses that may be placed in a workflow.
    ///
    /// Sends `GET /statuses/active`.
    pub async fn list_active_statuses(&self) -> Result<Vec<Status>, ApiError> {
        self.get("/statuses/active").await
    }

    /// Create a status. The body is validated before anything is sent.
    pub async fn create_status(&self, input: StatusInput) -> Result<Status, ApiError> {
        let input = input.validated()?;
        self.post("/statuses", &input).await
    }

    /// Update a status. The body is validated before anything is sent.
    pub async fn update_status(&self, id: DbId, input: StatusInput) -> Result<Status, ApiError> {
        let input = input.validated()?;
        self.put(&format!("/statuses/{id}"), &input).await
    }

    /// Sends `DELETE /statuses/{id}`.
    pub async fn delete_status(&self, id: DbId) -> Result<(), ApiError> {
        self.delete(&format!("/statuses/{id}")).await
    }
}
