//! Bearer-token sources for [`crate::ApiClient`].
//!
//! The client asks its provider for the current token on every request, so a
//! [`SessionToken`] updated by a login is picked up by the next call without
//! rebuilding the client.

use std::sync::{Arc, PoisonError, RwLock};

/// Supplies the bearer token for outgoing requests.
pub trait CredentialProvider: Send + Sync {
    /// The token to send, or `None` to send no `Authorization` header.
    fn token(&self) -> Option<String>;
}

/// Sends no credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn token(&self) -> Option<String> {
        None
    }
}

/// A fixed token, e.g. from `PLM_API_TOKEN`.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl CredentialProvider for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// A token set by login and cleared by logout, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct SessionToken {
    inner: Arc<RwLock<Option<String>>>,
}

impl SessionToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    pub fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

impl CredentialProvider for SessionToken {
    fn token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
