//! Domain model for the PLM workflow client.
//!
//! Typed records for statuses, workflows, products, categories and users,
//! the status progression ([`sequencer`]) and the editor drafts ([`draft`]).
//! No I/O lives here; the HTTP side is in `plm-client`.

pub mod category;
pub mod draft;
pub mod error;
pub mod product;
pub mod sequencer;
pub mod status;
pub mod types;
pub mod user;
pub mod workflow;
