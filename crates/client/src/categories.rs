//! Category endpoints.

use plm_core::category::{Category, CategoryPage, CategorySearch};
use plm_core::types::DbId;

use crate::error::ApiError;
use crate::http::ApiClient;

impl ApiClient {
    /// Sends `GET /categories/{id}`.
    pub async fn get_category(&self, id: DbId) -> Result<Category, ApiError> {
        self.get(&format!("/categories/{id}")).await
    }

    /// Search categories by name, one page at a time.
    ///
    /// Sends `GET /categories/search?searchString=..&page=..&pageSize=..`.
    pub async fn search_categories(
        &self,
        search: &CategorySearch,
    ) -> Result<CategoryPage, ApiError> {
        self.get_query("/categories/search", search).await
    }
}
