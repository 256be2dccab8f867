//! Typed REST client for the PLM backend.
//!
//! [`ApiClient`] covers the status, workflow, product, category, user and
//! auth endpoints. [`sequencer::StatusSequencer`] and
//! [`sequencer::TrackedProduct`] add the status-change flow on top.

pub mod auth;
pub mod categories;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod products;
pub mod sequencer;
pub mod statuses;
pub mod users;
pub mod workflows;

pub use config::ClientConfig;
pub use credentials::{CredentialProvider, NoCredentials, SessionToken, StaticToken};
pub use error::ApiError;
pub use http::ApiClient;
pub use sequencer::{StatusChangeError, StatusSequencer, TrackedProduct};
