//! Plain-text and JSON rendering of workflow progress.

use plm_core::sequencer::ClassifiedStatus;
use plm_core::status::Status;
use serde_json::{json, Value};

const ARROW: &str = " -> ";

/// One pill: name, position and the colour it is drawn with.
fn pill(entry: &ClassifiedStatus<'_>) -> String {
    format!(
        "{} ({}, {})",
        entry.status.display_name(),
        entry.position.as_str(),
        entry.display_color()
    )
}

/// Pills joined by arrows, with no arrow after the last one.
pub fn progress_line(positions: &[ClassifiedStatus<'_>]) -> String {
    let mut line = String::new();
    for entry in positions {
        line.push_str(&pill(entry));
        if !entry.is_last {
            line.push_str(ARROW);
        }
    }
    line
}

pub fn progress_json(positions: &[ClassifiedStatus<'_>]) -> Value {
    positions
        .iter()
        .map(|entry| {
            json!({
                "statusId": entry.status.id,
                "name": entry.status.display_name(),
                "description": entry.status.display_description(),
                "orderIndex": entry.order_index,
                "position": entry.position.as_str(),
                "color": entry.display_color(),
                "dimmed": entry.is_dimmed(),
            })
        })
        .collect()
}

/// One row per status: id, sort order, colour, active flag, name.
pub fn status_table(statuses: &[Status]) -> String {
    statuses
        .iter()
        .map(|s| {
            format!(
                "{:>4}  {:>4}  {:<8}  {:<8}  {}",
                s.id,
                s.sort_order,
                s.color(),
                if s.active { "active" } else { "inactive" },
                s.display_name()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
