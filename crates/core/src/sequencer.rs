//! Status progression for a product within its workflow.
//!
//! Given a workflow's status associations and the product's current status,
//! [`classify`] lays the statuses out left to right and marks each one as
//! already passed, current, or not yet reached. The result is derived on
//! every call and never stored.

use serde::Serialize;

use crate::product::Product;
use crate::status::Status;
use crate::types::{DbId, DEFAULT_STATUS_COLOR};
use crate::workflow::{sort_by_order_index, Workflow, WorkflowStatus};

/// Where a status sits relative to the product's current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPosition {
    /// Precedes the current status (already completed).
    Behind,
    /// The product's current status.
    Current,
    /// Follows the current status (not yet reached).
    Ahead,
}

impl StatusPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Behind => "behind",
            Self::Current => "current",
            Self::Ahead => "ahead",
        }
    }
}

/// One entry of a classified progression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedStatus<'a> {
    pub status: &'a Status,
    pub order_index: i32,
    pub position: StatusPosition,
    /// True only for the final entry; renderers draw no connector after it.
    pub is_last: bool,
}

impl ClassifiedStatus<'_> {
    /// Pill color: the status color once reached, grey while ahead.
    pub fn display_color(&self) -> &str {
        match self.position {
            StatusPosition::Behind | StatusPosition::Current => self.status.color(),
            StatusPosition::Ahead => DEFAULT_STATUS_COLOR,
        }
    }

    /// Completed statuses are drawn faded.
    pub fn is_dimmed(&self) -> bool {
        self.position == StatusPosition::Behind
    }
}

/// Classify a workflow's statuses against the current status.
///
/// The input is sorted by `order_index` here (stable, so ties keep their
/// input order); callers need not pre-sort. If `current_status_id` is `None`
/// or matches no status, every status is [`StatusPosition::Ahead`].
pub fn classify<'a>(
    statuses: &'a [WorkflowStatus],
    current_status_id: Option<DbId>,
) -> Vec<ClassifiedStatus<'a>> {
    let ordered = sort_by_order_index(statuses);

    let current_pos = current_status_id
        .and_then(|id| ordered.iter().position(|ws| ws.status.id == id));

    let last = ordered.len().saturating_sub(1);
    ordered
        .into_iter()
        .enumerate()
        .map(|(i, ws)| {
            let position = match current_pos {
                Some(cur) if i < cur => StatusPosition::Behind,
                Some(cur) if i == cur => StatusPosition::Current,
                _ => StatusPosition::Ahead,
            };
            ClassifiedStatus {
                status: &ws.status,
                order_index: ws.order_index,
                position,
                is_last: i == last,
            }
        })
        .collect()
}

/// Classify `workflow` against `product`'s current status.
pub fn classify_workflow<'a>(
    workflow: &'a Workflow,
    product: &Product,
) -> Vec<ClassifiedStatus<'a>> {
    classify(&workflow.workflow_statuses, product.status_id())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ws(id: DbId, order_index: i32) -> WorkflowStatus {
        WorkflowStatus {
            id: None,
            order_index,
            status: serde_json::from_value(serde_json::json!({
                "id": id,
                "name": format!("Status {id}"),
                "statusColorHex": "#123456",
            }))
            .unwrap(),
        }
    }

    fn positions(classified: &[ClassifiedStatus<'_>]) -> Vec<(DbId, StatusPosition)> {
        classified.iter().map(|c| (c.status.id, c.position)).collect()
    }

    #[test]
    fn classifies_three_statuses_around_current() {
        let statuses = vec![ws(1, 0), ws(2, 1), ws(3, 2)];
        let result = classify(&statuses, Some(2));

        assert_eq!(
            positions(&result),
            vec![
                (1, StatusPosition::Behind),
                (2, StatusPosition::Current),
                (3, StatusPosition::Ahead),
            ]
        );
    }

    #[test]
    fn sorts_unordered_input() {
        let statuses = vec![ws(3, 2), ws(1, 0), ws(2, 1)];
        let ids: Vec<DbId> = classify(&statuses, Some(1))
            .iter()
            .map(|c| c.status.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn ordering_uses_order_index_not_id() {
        let statuses = vec![ws(10, 1), ws(20, 0)];
        let result = classify(&statuses, Some(10));
        assert_eq!(
            positions(&result),
            vec![(20, StatusPosition::Behind), (10, StatusPosition::Current)]
        );
    }

    #[test]
    fn matches_workflow_ordering_including_ties() {
        let workflow = Workflow {
            id: 1,
            name: "Footwear".into(),
            description: None,
            active: true,
            is_default: false,
            workflow_statuses: vec![ws(4, 1), ws(2, 0), ws(3, 1), ws(1, 0)],
        };

        let classified: Vec<DbId> = classify(&workflow.workflow_statuses, None)
            .iter()
            .map(|c| c.status.id)
            .collect();
        let ordered: Vec<DbId> = workflow
            .ordered_statuses()
            .iter()
            .map(|ws| ws.status.id)
            .collect();

        assert_eq!(classified, vec![2, 1, 4, 3]);
        assert_eq!(classified, ordered);
    }

    #[test]
    fn unknown_current_marks_everything_ahead() {
        let statuses = vec![ws(1, 0), ws(2, 1)];
        for current in [Some(99), None] {
            let result = classify(&statuses, current);
            assert!(result.iter().all(|c| c.position == StatusPosition::Ahead));
        }
    }

    #[test]
    fn only_final_entry_is_last() {
        let statuses = vec![ws(1, 0), ws(2, 1), ws(3, 2)];
        let flags: Vec<bool> = classify(&statuses, Some(1)).iter().map(|c| c.is_last).collect();
        assert_eq!(flags, vec![false, false, true]);
    }

    #[test]
    fn empty_workflow_classifies_to_nothing() {
        assert!(classify(&[], Some(1)).is_empty());
    }

    #[test]
    fn display_color_greys_out_ahead() {
        let statuses = vec![ws(1, 0), ws(2, 1), ws(3, 2)];
        let result = classify(&statuses, Some(2));

        assert_eq!(result[0].display_color(), "#123456");
        assert!(result[0].is_dimmed());
        assert_eq!(result[1].display_color(), "#123456");
        assert!(!result[1].is_dimmed());
        assert_eq!(result[2].display_color(), DEFAULT_STATUS_COLOR);
    }

    #[test]
    fn classify_workflow_uses_product_status() {
        let workflow = Workflow {
            id: 1,
            name: "Footwear".into(),
            description: None,
            active: true,
            is_default: true,
            workflow_statuses: vec![ws(1, 0), ws(2, 1)],
        };
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": 5,
            "productStatus": {"id": 2},
        }))
        .unwrap();

        let result = classify_workflow(&workflow, &product);
        assert_eq!(result[1].position, StatusPosition::Current);
    }
}
