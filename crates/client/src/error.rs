//! Errors from the PLM REST client.

use plm_core::error::CoreError;

use crate::http::Payload;

/// Field in a rejection body listing the required fields a product lacks.
pub const MISSING_REQUIRED_FIELDS_KEY: &str = "missingRequiredFields";

/// Errors from the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response reached us (connection refused, DNS, TLS, timeout).
    #[error("Cannot reach server: {0}")]
    Network(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Backend `message`, else `error`, else the text body, else
        /// `HTTP <status>`.
        message: String,
        /// The parsed error body.
        body: Payload,
    },

    /// A 2xx response whose body is not the expected record.
    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The base URL and path do not form a valid URL.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// Client configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client-side validation failed before anything was sent.
    #[error(transparent)]
    Invalid(#[from] CoreError),
}

impl ApiError {
    /// HTTP status of the failure; `0` when no response was received.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Http { status, .. } => *status,
            _ => 0,
        }
    }

    /// Human-readable message suitable for an error banner.
    pub fn message(&self) -> String {
        match self {
            ApiError::Network(_) => "Network error".to_string(),
            ApiError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether the backend refused our credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), 401 | 403)
    }

    /// The `missingRequiredFields` list of a structured rejection body.
    ///
    /// Entries may be plain strings or objects carrying `fieldKey` / `name`.
    /// Returns `None` when the body has no such list.
    pub fn missing_required_fields(&self) -> Option<Vec<String>> {
        let ApiError::Http {
            body: Payload::Json(body),
            ..
        } = self
        else {
            return None;
        };
        let entries = body.get(MISSING_REQUIRED_FIELDS_KEY)?.as_array()?;
        Some(
            entries
                .iter()
                .filter_map(|entry| match entry {
                    serde_json::Value::String(s) => Some(s.clone()),
                    serde_json::Value::Object(obj) => obj
                        .get("fieldKey")
                        .or_else(|| obj.get("name"))
                        .and_then(|v| v.as_str())
                        .map(str::to_string),
                    _ => None,
                })
                .collect(),
        )
    }
}
