use std::sync::Arc;
use std::time::Duration;

use crate::credentials::{CredentialProvider, NoCredentials, StaticToken};
use crate::error::ApiError;

/// Base URL used when `PLM_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Request timeout used when `PLM_REQUEST_TIMEOUT_SECS` is not set.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for a backend running locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL including the `/api` prefix.
    pub base_url: String,
    /// Per-request timeout; `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    /// Static bearer token, if any.
    pub token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Some(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
            token: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                      |
    /// |----------------------------|------------------------------|
    /// | `PLM_API_URL`              | `http://localhost:8080/api`  |
    /// | `PLM_REQUEST_TIMEOUT_SECS` | `30` (`0` disables)          |
    /// | `PLM_API_TOKEN`            | unset                        |
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let base_url = lookup("PLM_API_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs: u64 = match lookup("PLM_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                ApiError::Config(format!(
                    "PLM_REQUEST_TIMEOUT_SECS must be a non-negative integer, got '{raw}'"
                ))
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        let request_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        let token = lookup("PLM_API_TOKEN").filter(|t| !t.is_empty());

        Ok(Self {
            base_url,
            request_timeout,
            token,
        })
    }

    /// Credential provider for the configured static token, if any.
    pub fn credentials(&self) -> Arc<dyn CredentialProvider> {
        match &self.token {
            Some(token) => Arc::new(StaticToken::new(token.clone())),
            None => Arc::new(NoCredentials),
        }
    }
}
