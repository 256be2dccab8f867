//! Workflows: named, linear sequences of statuses.
//!
//! A workflow owns an ordered list of status associations. Each association
//! carries an `orderIndex`; within one workflow these are unique and define a
//! strict total order (no branching, no cycles). The backend does not
//! guarantee that `workflowStatuses` arrives sorted, so every consumer goes
//! through [`Workflow::ordered_statuses`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::status::Status;
use crate::types::{default_true, flag, DbId};

/// One status's place in a workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStatus {
    /// Association row id; absent on drafts echoed back by some endpoints.
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    pub order_index: i32,
    pub status: Status,
}

/// Status associations sorted by `orderIndex` ascending, ties in input order.
pub fn sort_by_order_index(statuses: &[WorkflowStatus]) -> Vec<&WorkflowStatus> {
    let mut ordered: Vec<&WorkflowStatus> = statuses.iter().collect();
    ordered.sort_by_key(|ws| ws.order_index);
    ordered
}

/// A workflow as returned by `GET /workflows/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: DbId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true", deserialize_with = "flag::deserialize")]
    pub active: bool,
    #[serde(default, deserialize_with = "flag::deserialize")]
    pub is_default: bool,
    #[serde(default)]
    pub workflow_statuses: Vec<WorkflowStatus>,
}

impl Workflow {
    /// Status associations sorted by `orderIndex` ascending.
    ///
    /// The sort is stable: associations sharing an index keep the order in
    /// which the backend sent them.
    pub fn ordered_statuses(&self) -> Vec<&WorkflowStatus> {
        sort_by_order_index(&self.workflow_statuses)
    }

    /// Check that no two associations share an `orderIndex`.
    pub fn validate_order(&self) -> Result<(), CoreError> {
        let mut seen = HashSet::with_capacity(self.workflow_statuses.len());
        for ws in &self.workflow_statuses {
            if !seen.insert(ws.order_index) {
                return Err(CoreError::Validation(format!(
                    "Workflow '{}' has more than one status at order index {}",
                    self.name, ws.order_index
                )));
            }
        }
        Ok(())
    }

    /// Whether the given status belongs to this workflow.
    pub fn contains_status(&self, status_id: DbId) -> bool {
        self.workflow_statuses
            .iter()
            .any(|ws| ws.status.id == status_id)
    }

    /// Look up a member status by id.
    pub fn status(&self, status_id: DbId) -> Result<&Status, CoreError> {
        self.workflow_statuses
            .iter()
            .map(|ws| &ws.status)
            .find(|s| s.id == status_id)
            .ok_or(CoreError::NotFound {
                entity: "workflow status",
                id: status_id,
            })
    }
}

/// A `{statusId, orderIndex}` pair in a workflow create/update body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStatusInput {
    pub status_id: DbId,
    pub order_index: i32,
}

/// Request body for `POST /workflows` and `PUT /workflows/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowInput {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Workflow name must be between 1 and 100 characters"
    ))]
    pub name: String,
    pub description: String,
    #[serde(serialize_with = "flag::serialize")]
    pub active: bool,
    #[serde(serialize_with = "flag::serialize")]
    pub is_default: bool,
    pub workflow_statuses: Vec<WorkflowStatusInput>,
}

impl WorkflowInput {
    /// Run field validation, mapping failures to [`CoreError::Validation`].
    pub fn validated(self) -> Result<Self, CoreError> {
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_validation<T: std::fmt::Debug>(result: Result<T, CoreError>, needle: &str) {
        match result {
            Err(CoreError::Validation(msg)) => assert!(msg.contains(needle), "{msg}"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    fn workflow_json() -> &'static str {
        r##"{
            "id": 7,
            "name": "Footwear",
            "description": null,
            "active": 1,
            "isDefault": true,
            "workflowStatuses": [
                {"id": 30, "orderIndex": 2, "status": {"id": 3, "name": "Production", "statusColorHex": "#0ea5e9"}},
                {"id": 10, "orderIndex": 0, "status": {"id": 1, "name": "Concept", "statusColorHex": "#22c55e"}},
                {"id": 20, "orderIndex": 1, "status": {"id": 2, "name": "Design", "statusColorHex": "#f97316"}}
            ]
        }"##
    }

    #[test]
    fn parses_workflow_with_integer_flags() {
        let wf: Workflow = serde_json::from_str(workflow_json()).unwrap();
        assert!(wf.active);
        assert!(wf.is_default);
        assert_eq!(wf.workflow_statuses.len(), 3);
    }

    #[test]
    fn ordered_statuses_sorts_by_order_index() {
        let wf: Workflow = serde_json::from_str(workflow_json()).unwrap();
        let ids: Vec<DbId> = wf.ordered_statuses().iter().map(|ws| ws.status.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn ordered_statuses_keeps_tie_order() {
        let mut wf: Workflow = serde_json::from_str(workflow_json()).unwrap();
        for ws in &mut wf.workflow_statuses {
            ws.order_index = 0;
        }
        let ids: Vec<DbId> = wf.ordered_statuses().iter().map(|ws| ws.status.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn validate_order_rejects_duplicate_indexes() {
        let mut wf: Workflow = serde_json::from_str(workflow_json()).unwrap();
        assert!(wf.validate_order().is_ok());

        wf.workflow_statuses[0].order_index = 1;
        assert_validation(wf.validate_order(), "order index 1");
    }

    #[test]
    fn status_lookup() {
        let wf: Workflow = serde_json::from_str(workflow_json()).unwrap();
        assert!(wf.contains_status(2));
        assert!(!wf.contains_status(99));
        assert_eq!(wf.status(2).unwrap().display_name(), "Design");
        assert!(matches!(
            wf.status(99),
            Err(CoreError::NotFound { id: 99, .. })
        ));
    }

    #[test]
    fn association_without_status_is_rejected() {
        let json = r#"{"id": 1, "name": "Broken", "workflowStatuses": [{"orderIndex": 0}]}"#;
        assert!(serde_json::from_str::<Workflow>(json).is_err());
    }

    #[test]
    fn input_serializes_flags_and_pairs() {
        let input = WorkflowInput {
            name: "Footwear".into(),
            description: String::new(),
            active: true,
            is_default: false,
            workflow_statuses: vec![WorkflowStatusInput {
                status_id: 4,
                order_index: 0,
            }],
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["active"], 1);
        assert_eq!(json["isDefault"], 0);
        assert_eq!(json["workflowStatuses"][0]["statusId"], 4);
        assert_eq!(json["workflowStatuses"][0]["orderIndex"], 0);
    }

    #[test]
    fn input_requires_name() {
        let input = WorkflowInput {
            name: String::new(),
            description: String::new(),
            active: true,
            is_default: false,
            workflow_statuses: vec![],
        };
        assert_validation(input.validated(), "Workflow name");
    }
}
