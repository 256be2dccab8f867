//! Product lifecycle statuses.
//!
//! A status is a named, colored stage a product can be in. Statuses are
//! grouped into workflows (see [`crate::workflow`]); on their own they only
//! carry a global `sortOrder` used for listing, which has no meaning inside a
//! workflow's sequence.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::types::{default_true, flag, DbId, DEFAULT_STATUS_COLOR};

/// Shown when a status has no name.
pub const UNKNOWN_STATUS_NAME: &str = "Unknown status";

/// Shown when a status has no description.
pub const NO_DESCRIPTION: &str = "No description available.";

static COLOR_HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid regex"));

/// A field that must be non-empty on a product before it may enter a status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredField {
    pub id: DbId,
    pub field_key: String,
}

/// A status as returned by `GET /statuses` and embedded in workflows and
/// products.
///
/// Embedded copies usually only carry `id`, `name` and the color; the other
/// fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub id: DbId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "colorHexCode")]
    pub status_color_hex: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(
        default = "default_true",
        alias = "isActive",
        deserialize_with = "flag::deserialize"
    )]
    pub active: bool,
    #[serde(default)]
    pub required_fields: Vec<RequiredField>,
}

impl Status {
    /// Label for display, falling back to [`UNKNOWN_STATUS_NAME`].
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => UNKNOWN_STATUS_NAME,
        }
    }

    /// Description for display, falling back to [`NO_DESCRIPTION`].
    pub fn display_description(&self) -> &str {
        match self.description.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => NO_DESCRIPTION,
        }
    }

    /// The status color, or [`DEFAULT_STATUS_COLOR`] when none is set.
    pub fn color(&self) -> &str {
        match self.status_color_hex.as_deref() {
            Some(color) if !color.is_empty() => color,
            _ => DEFAULT_STATUS_COLOR,
        }
    }

    /// Keys of the fields a product must fill in before entering this status.
    pub fn required_field_keys(&self) -> Vec<&str> {
        self.required_fields
            .iter()
            .map(|f| f.field_key.as_str())
            .collect()
    }
}

/// Request body for `POST /statuses` and `PUT /statuses/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StatusInput {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Status name must be between 1 and 100 characters"
    ))]
    pub name: String,
    pub description: String,
    #[validate(custom(function = "validate_color_hex"))]
    pub status_color_hex: String,
    pub sort_order: i32,
    #[serde(serialize_with = "flag::serialize")]
    pub active: bool,
}

impl StatusInput {
    /// Run field validation, mapping failures to [`CoreError::Validation`].
    pub fn validated(self) -> Result<Self, CoreError> {
        self.validate()?;
        Ok(self)
    }
}

/// Accepts `#RGB` and `#RRGGBB` in either case.
pub fn validate_color_hex(value: &str) -> Result<(), ValidationError> {
    if COLOR_HEX_RE.is_match(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("color_hex");
        err.message = Some(format!("Invalid color '{value}', expected #RGB or #RRGGBB").into());
        Err(err)
    }
}
