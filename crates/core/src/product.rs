//! Products and their request bodies.
//!
//! A product belongs to exactly one workflow and sits in exactly one of that
//! workflow's statuses. The backend enforces that the status belongs to the
//! workflow; this crate assumes it holds.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::status::Status;
use crate::types::DbId;
use crate::user::UserRef;
use crate::workflow::Workflow;

/// A product as returned by `GET /products/{id}` and by update endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub colour: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub product_category: Option<Category>,
    #[serde(default)]
    pub product_status: Option<Status>,
    #[serde(default)]
    pub workflow: Option<Workflow>,
    #[serde(default)]
    pub workflow_id: Option<DbId>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub created_by: Option<UserRef>,
    #[serde(default)]
    pub updated_by: Option<UserRef>,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl Product {
    /// Id of the product's current status, if any.
    pub fn status_id(&self) -> Option<DbId> {
        self.product_status.as_ref().map(|s| s.id)
    }

    /// Id of the product's workflow, whether embedded or referenced.
    pub fn workflow_id(&self) -> Option<DbId> {
        self.workflow
            .as_ref()
            .map(|w| w.id)
            .or(self.workflow_id)
    }

    /// Current value of a required-field key, `None` when empty.
    ///
    /// Keys are matched case-insensitively. Keys this client does not know
    /// about also return `None`.
    pub fn field_value(&self, key: &str) -> Option<String> {
        match key.trim().to_ascii_lowercase().as_str() {
            "name" => non_empty(Some(&self.name)),
            "description" => non_empty(self.description.as_deref()),
            "colour" | "color" => non_empty(self.colour.as_deref()),
            "price" => self.price.map(|p| p.to_string()),
            "category" | "categoryid" | "productcategory" => {
                self.product_category.as_ref().map(|c| c.id.to_string())
            }
            _ => None,
        }
    }

    fn is_known_field(key: &str) -> bool {
        matches!(
            key.trim().to_ascii_lowercase().as_str(),
            "name"
                | "description"
                | "colour"
                | "color"
                | "price"
                | "category"
                | "categoryid"
                | "productcategory"
        )
    }

    /// Required fields of `status` that are empty on this product.
    ///
    /// Advisory only: keys unknown to this client are skipped and the backend
    /// remains the authority on whether a status change is accepted.
    pub fn missing_required_fields(&self, status: &Status) -> Vec<String> {
        status
            .required_fields
            .iter()
            .filter(|f| Self::is_known_field(&f.field_key))
            .filter(|f| self.field_value(&f.field_key).is_none())
            .map(|f| f.field_key.clone())
            .collect()
    }
}

/// A row from `GET /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: DbId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status_name: Option<String>,
    #[serde(default)]
    pub status_color_hex: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body for `POST /products`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub product_category_id: DbId,
    pub product_status_id: DbId,
}

/// Body for `PUT /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub status_id: Option<DbId>,
    pub updated_by_id: Option<DbId>,
    pub colour: Option<String>,
    pub price: Option<f64>,
}

impl ProductUpdate {
    /// An update body that leaves every field as it currently is.
    ///
    /// `updated_by` falls back to the product's last editor, then its
    /// creator, when no acting user is given.
    pub fn from_product(product: &Product, updated_by: Option<DbId>) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            category_id: product.product_category.as_ref().map(|c| c.id),
            status_id: product.status_id(),
            updated_by_id: updated_by
                .or(product.updated_by.map(|u| u.id))
                .or(product.created_by.map(|u| u.id)),
            colour: product.colour.clone(),
            price: product.price,
        }
    }
}

/// Body for the dedicated status-change endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub status_id: DbId,
}
