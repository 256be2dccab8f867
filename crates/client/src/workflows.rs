//! Workflow endpoints.

use plm_core::types::DbId;
use plm_core::workflow::{Workflow, WorkflowInput};

use crate::error::ApiError;
use crate::http::ApiClient;

impl ApiClient {
    /// Sends `GET /workflows`.
    pub async fn list_workflows(&self) -> Result<Vec<Workflow>, ApiError> {
        self.get("/workflows").await
    }

    /// Fetch one workflow with its ordered status associations.
    ///
    /// Sends `GET /workflows/{id}`.
    pub async fn get_workflow(&self, id: DbId) -> Result<Workflow, ApiError> {
        self.get(&format!("/workflows/{id}")).await
    }

    /// Flip a workflow's active flag. Sends `PUT /workflows/{id}/toggle-active`
    /// with no body and returns the updated workflow.
    pub async fn toggle_workflow_active(&self, id: DbId) -> Result<Workflow, ApiError> {
        self.put_empty(&format!("/workflows/{id}/toggle-active")).await
    }

    /// Create a workflow from a (normally draft-built) input.
    pub async fn create_workflow(&self, input: WorkflowInput) -> Result<Workflow, ApiError> {
        let input = input.validated()?;
        tracing::info!(
            name = %input.name,
            statuses = input.workflow_statuses.len(),
            "Creating workflow"
        );
        self.post("/workflows", &input).await
    }

    /// Replace a workflow, including its status associations.
    pub async fn update_workflow(
        &self,
        id: DbId,
        input: WorkflowInput,
    ) -> Result<Workflow, ApiError> {
        let input = input.validated()?;
        tracing::info!(
            workflow_id = id,
            statuses = input.workflow_statuses.len(),
            "Updating workflow"
        );
        self.put(&format!("/workflows/{id}"), &input).await
    }

    /// Sends `DELETE /workflows/{id}`.
    pub async fn delete_workflow(&self, id: DbId) -> Result<(), ApiError> {
        self.delete(&format!("/workflows/{id}")).await
    }
}
