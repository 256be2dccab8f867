//! Users and authentication payloads.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// A user as returned by `GET /users/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role_id: Option<DbId>,
}

/// Reference to a user embedded in another record (e.g. `updatedBy`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: DbId,
}

/// Body for `POST /users` and `PUT /users/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Body for `PUT /users/{id}/password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

impl PasswordChange {
    /// Build a password change, checking the confirmation matches.
    pub fn new(current: &str, new: &str, confirm: &str) -> Result<Self, CoreError> {
        if new.is_empty() {
            return Err(CoreError::Validation(
                "New password must not be empty".to_string(),
            ));
        }
        if new != confirm {
            return Err(CoreError::Validation(
                "New password and confirmation do not match.".to_string(),
            ));
        }
        Ok(Self {
            current_password: current.to_string(),
            new_password: new.to_string(),
        })
    }
}

/// Body for `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response from `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

impl LoginResponse {
    /// The bearer token, or a validation error if the backend sent none.
    pub fn into_token(self) -> Result<String, CoreError> {
        match self.token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(CoreError::Validation(
                "Token not found in response.".to_string(),
            )),
        }
    }
}
