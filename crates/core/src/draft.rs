//! Local drafts behind the status and workflow editors.
//!
//! An editor keeps a draft while the administrator toggles statuses and types
//! sort orders; nothing is sent until [`WorkflowDraft::to_input`] or
//! [`StatusDraft::to_input`] turns the draft into a request body.

use crate::error::CoreError;
use crate::status::{Status, StatusInput};
use crate::types::{DbId, DEFAULT_STATUS_COLOR};
use crate::workflow::{Workflow, WorkflowInput, WorkflowStatusInput};

/// Parse a sort order typed into a numeric field; anything unparsable is 0.
pub fn parse_sort_order(raw: &str) -> i32 {
    raw.trim().parse::<i32>().unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Workflow draft
// ---------------------------------------------------------------------------

/// A status selected in the workflow editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftEntry {
    pub status_id: DbId,
    pub sort_order: i32,
}

/// A selected status joined with its catalogue entry, for the preview strip.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewEntry<'a> {
    pub status: &'a Status,
    pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowDraft {
    pub name: String,
    pub description: String,
    pub active: bool,
    pub is_default: bool,
    entries: Vec<DraftEntry>,
}

impl Default for WorkflowDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            active: true,
            is_default: false,
            entries: Vec::new(),
        }
    }
}

impl WorkflowDraft {
    /// Seed a draft from an existing workflow, one entry per association
    /// with `sort_order = orderIndex`.
    pub fn from_workflow(workflow: &Workflow) -> Self {
        Self {
            name: workflow.name.clone(),
            description: workflow.description.clone().unwrap_or_default(),
            active: workflow.active,
            is_default: workflow.is_default,
            entries: workflow
                .workflow_statuses
                .iter()
                .map(|ws| DraftEntry {
                    status_id: ws.status.id,
                    sort_order: ws.order_index,
                })
                .collect(),
        }
    }

    /// Entries in selection order.
    pub fn entries(&self) -> &[DraftEntry] {
        &self.entries
    }

    pub fn is_selected(&self, status_id: DbId) -> bool {
        self.entries.iter().any(|e| e.status_id == status_id)
    }

    /// Select or deselect a status.
    ///
    /// Selecting appends the status with a sort order one above the current
    /// maximum (an empty draft counts as maximum 0), capped at `i32::MAX`.
    /// Selecting an already
    /// selected status changes nothing. A status toggled off and on again
    /// does not get its old sort order back.
    pub fn toggle(&mut self, status_id: DbId, selected: bool) {
        if selected {
            if self.is_selected(status_id) {
                return;
            }
            let max_order = self.entries.iter().map(|e| e.sort_order).max().unwrap_or(0);
            self.entries.push(DraftEntry {
                status_id,
                sort_order: max_order.saturating_add(1),
            });
        } else {
            self.entries.retain(|e| e.status_id != status_id);
        }
    }

    /// Set the sort order of a selected status from raw field input.
    pub fn set_sort_order(&mut self, status_id: DbId, raw: &str) -> Result<(), CoreError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.status_id == status_id)
            .ok_or(CoreError::NotFound {
                entity: "selected status",
                id: status_id,
            })?;
        entry.sort_order = parse_sort_order(raw);
        Ok(())
    }

    /// Entries sorted by sort order with dense `orderIndex` values `0..n`.
    ///
    /// Ties keep selection order.
    pub fn normalized(&self) -> Vec<WorkflowStatusInput> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(|e| e.sort_order);
        sorted
            .into_iter()
            .enumerate()
            .map(|(index, e)| WorkflowStatusInput {
                status_id: e.status_id,
                order_index: index as i32,
            })
            .collect()
    }

    /// Build the create/update body.
    pub fn to_input(&self) -> Result<WorkflowInput, CoreError> {
        WorkflowInput {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            active: self.active,
            is_default: self.is_default,
            workflow_statuses: self.normalized(),
        }
        .validated()
    }

    /// Selected statuses joined with the status catalogue, sorted by sort
    /// order. Ids missing from the catalogue are skipped.
    pub fn preview<'a>(&self, catalogue: &'a [Status]) -> Vec<PreviewEntry<'a>> {
        let mut preview: Vec<PreviewEntry<'a>> = self
            .entries
            .iter()
            .filter_map(|e| {
                catalogue
                    .iter()
                    .find(|s| s.id == e.status_id)
                    .map(|status| PreviewEntry {
                        status,
                        sort_order: e.sort_order,
                    })
            })
            .collect();
        preview.sort_by_key(|p| p.sort_order);
        preview
    }
}

// ---------------------------------------------------------------------------
// Status draft
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDraft {
    pub name: String,
    pub description: String,
    pub color_hex: String,
    pub sort_order: i32,
    pub active: bool,
}

impl Default for StatusDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            color_hex: DEFAULT_STATUS_COLOR.to_string(),
            sort_order: 0,
            active: true,
        }
    }
}

impl StatusDraft {
    pub fn from_status(status: &Status) -> Self {
        Self {
            name: status.name.clone().unwrap_or_default(),
            description: status.description.clone().unwrap_or_default(),
            color_hex: status.color().to_string(),
            sort_order: status.sort_order,
            active: status.active,
        }
    }

    pub fn set_sort_order(&mut self, raw: &str) {
        self.sort_order = parse_sort_order(raw);
    }

    /// Build the create/update body.
    pub fn to_input(&self) -> Result<StatusInput, CoreError> {
        StatusInput {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            status_color_hex: self.color_hex.trim().to_string(),
            sort_order: self.sort_order,
            active: self.active,
        }
        .validated()
    }
}
