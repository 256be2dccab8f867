//! Status changes for products.
//!
//! [`StatusSequencer`] issues the change request and turns a structured
//! rejection into [`StatusChangeError::Rejected`] so callers can flag the
//! missing fields. [`TrackedProduct`] is the caller-side cache of one product
//! and its workflow: it only replaces the cached product on success.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use plm_core::error::CoreError;
use plm_core::product::Product;
use plm_core::sequencer::{classify, ClassifiedStatus};
use plm_core::types::DbId;
use plm_core::workflow::Workflow;

use crate::error::ApiError;
use crate::http::ApiClient;

/// Why a status change did not happen.
#[derive(Debug, thiserror::Error)]
pub enum StatusChangeError {
    /// A change for this product is already in flight.
    #[error("A status change for product {product_id} is already in progress")]
    AlreadyPending { product_id: DbId },

    /// The backend refused the change and said which fields are missing.
    #[error("Status change rejected ({status}): {message}")]
    Rejected {
        status: u16,
        message: String,
        missing_required_fields: Vec<String>,
    },

    /// The target status is not part of the product's workflow.
    #[error("Status {status_id} is not part of this product's workflow")]
    NotInWorkflow { status_id: DbId },

    /// Anything else: network failure, unstructured error, malformed body.
    #[error(transparent)]
    Failed(ApiError),
}

impl From<ApiError> for StatusChangeError {
    fn from(err: ApiError) -> Self {
        match err.missing_required_fields() {
            Some(missing_required_fields) => StatusChangeError::Rejected {
                status: err.status(),
                message: err.message(),
                missing_required_fields,
            },
            None => StatusChangeError::Failed(err),
        }
    }
}

impl StatusChangeError {
    /// Fields the backend reported missing; `None` unless the change was
    /// rejected with a structured body.
    pub fn missing_required_fields(&self) -> Option<&[String]> {
        match self {
            StatusChangeError::Rejected {
                missing_required_fields,
                ..
            } => Some(missing_required_fields),
            _ => None,
        }
    }

    /// Message suitable for an error banner.
    pub fn message(&self) -> String {
        match self {
            StatusChangeError::Rejected { message, .. } => message.clone(),
            StatusChangeError::Failed(err) => err.message(),
            other => other.to_string(),
        }
    }
}

/// Issues status changes, at most one in flight per product.
pub struct StatusSequencer {
    api: Arc<ApiClient>,
    pending: Mutex<HashSet<DbId>>,
}

/// Removes the product from the pending set when the request finishes,
/// whether it succeeded, failed or was dropped.
struct PendingGuard<'a> {
    pending: &'a Mutex<HashSet<DbId>>,
    product_id: DbId,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.product_id);
    }
}

impl StatusSequencer {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            pending: Mutex::new(HashSet::new()),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Whether a change for `product_id` is in flight.
    pub fn is_pending(&self, product_id: DbId) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&product_id)
    }

    fn begin(&self, product_id: DbId) -> Option<PendingGuard<'_>> {
        let inserted = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(product_id);
        inserted.then_some(PendingGuard {
            pending: &self.pending,
            product_id,
        })
    }

    /// Ask the backend to move `product_id` to `target_status_id`.
    ///
    /// Returns the product as the backend now has it. No retries and no
    /// optimistic update; a second call for the same product while this one
    /// runs fails with [`StatusChangeError::AlreadyPending`] without sending
    /// anything.
    pub async fn request_status_change(
        &self,
        product_id: DbId,
        target_status_id: DbId,
    ) -> Result<Product, StatusChangeError> {
        let Some(_guard) = self.begin(product_id) else {
            tracing::debug!(product_id, "Status change already in progress");
            return Err(StatusChangeError::AlreadyPending { product_id });
        };

        tracing::info!(product_id, status_id = target_status_id, "Requesting status change");

        match self
            .api
            .change_product_status(product_id, target_status_id)
            .await
        {
            Ok(product) => {
                if product.status_id() != Some(target_status_id) {
                    tracing::warn!(
                        product_id,
                        requested = target_status_id,
                        returned = ?product.status_id(),
                        "Backend returned a different status than requested"
                    );
                }
                Ok(product)
            }
            Err(e) => {
                let err = StatusChangeError::from(e);
                match err.missing_required_fields() {
                    Some(missing) => tracing::warn!(
                        product_id,
                        status_id = target_status_id,
                        missing = ?missing,
                        "Status change rejected for missing required fields"
                    ),
                    None => tracing::warn!(
                        product_id,
                        status_id = target_status_id,
                        error = %err,
                        "Status change failed"
                    ),
                }
                Err(err)
            }
        }
    }
}

/// One product and its workflow, as a detail view holds them.
#[derive(Debug, Clone)]
pub struct TrackedProduct {
    product: Product,
    workflow: Workflow,
    flagged_fields: Vec<String>,
}

impl TrackedProduct {
    pub fn new(product: Product, workflow: Workflow) -> Self {
        Self {
            product,
            workflow,
            flagged_fields: Vec::new(),
        }
    }

    /// Fetch a product and its workflow.
    ///
    /// Uses the workflow embedded in the product when present, otherwise
    /// fetches it by `workflowId`.
    pub async fn load(api: &ApiClient, product_id: DbId) -> Result<Self, ApiError> {
        let mut product = api.get_product(product_id).await?;
        let workflow = match product.workflow.take() {
            Some(workflow) => workflow,
            None => {
                let workflow_id = product.workflow_id.ok_or_else(|| {
                    CoreError::Validation(format!("Product {product_id} has no workflow"))
                })?;
                api.get_workflow(workflow_id).await?
            }
        };
        Ok(Self::new(product, workflow))
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    /// The workflow classified against the cached product's status.
    pub fn positions(&self) -> Vec<ClassifiedStatus<'_>> {
        classify(&self.workflow.workflow_statuses, self.product.status_id())
    }

    /// Fields the last rejected change reported as missing.
    pub fn flagged_fields(&self) -> &[String] {
        &self.flagged_fields
    }

    /// Locally known required fields of `target` that the product lacks.
    ///
    /// Advisory only; the backend decides.
    pub fn advisory_missing_fields(&self, target: DbId) -> Result<Vec<String>, CoreError> {
        let status = self.workflow.status(target)?;
        Ok(self.product.missing_required_fields(status))
    }

    /// Request a change and update the cache from the outcome.
    ///
    /// On success the cached product is replaced and flags are cleared. On
    /// failure the cached product is left as it was and any missing fields
    /// the backend reported become the flagged fields.
    pub async fn change_status(
        &mut self,
        sequencer: &StatusSequencer,
        target: DbId,
    ) -> Result<&Product, StatusChangeError> {
        if !self.workflow.contains_status(target) {
            return Err(StatusChangeError::NotInWorkflow { status_id: target });
        }

        match sequencer
            .request_status_change(self.product.id, target)
            .await
        {
            Ok(mut updated) => {
                updated.workflow_id = updated.workflow_id().or(self.product.workflow_id());
                updated.workflow = None;
                self.product = updated;
                self.flagged_fields.clear();
                Ok(&self.product)
            }
            Err(err) => {
                if let Some(missing) = err.missing_required_fields() {
                    self.flagged_fields = missing.to_vec();
                }
                Err(err)
            }
        }
    }

    pub fn is_pending(&self, sequencer: &StatusSequencer) -> bool {
        sequencer.is_pending(self.product.id)
    }
}
