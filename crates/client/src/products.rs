//! Product endpoints.

use plm_core::product::{Product, ProductCreate, ProductSummary, ProductUpdate, StatusChange};
use plm_core::types::DbId;

use crate::error::ApiError;
use crate::http::ApiClient;

impl ApiClient {
    /// List product summaries. Sends `GET /products`.
    pub async fn list_products(&self) -> Result<Vec<ProductSummary>, ApiError> {
        self.get("/products").await
    }

    /// Sends `GET /products/{id}`.
    pub async fn get_product(&self, id: DbId) -> Result<Product, ApiError> {
        self.get(&format!("/products/{id}")).await
    }

    /// Sends `POST /products`.
    pub async fn create_product(&self, input: &ProductCreate) -> Result<Product, ApiError> {
        self.post("/products", input).await
    }

    /// Sends `PUT /products/{id}` and returns the product as stored.
    pub async fn update_product(
        &self,
        id: DbId,
        input: &ProductUpdate,
    ) -> Result<Product, ApiError> {
        self.put(&format!("/products/{id}"), input).await
    }

    /// Sends `DELETE /products/{id}`.
    pub async fn delete_product(&self, id: DbId) -> Result<(), ApiError> {
        self.delete(&format!("/products/{id}")).await
    }

    /// Move a product to another status of its workflow.
    ///
    /// Sends `PUT /products/{id}/status` with `{"statusId": ..}`. This is the
    /// raw call; go through [`crate::sequencer::StatusSequencer`] to get the
    /// in-flight guard and the structured rejection.
    pub async fn change_product_status(
        &self,
        id: DbId,
        status_id: DbId,
    ) -> Result<Product, ApiError> {
        self.put(&format!("/products/{id}/status"), &StatusChange { status_id })
            .await
    }
}
