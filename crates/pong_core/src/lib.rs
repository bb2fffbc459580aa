//! Core domain logic for the pong mailbox service.
//! This crate is the single source of truth for delivery invariants.

pub mod db;
pub mod identity;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use identity::{IdentityError, IdentityResolver};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{
    is_valid_username_shape, validate_body, Note, NoteId, NoteValidationError, MAX_BODY_CHARS,
};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use service::delivery_service::{DeliveryError, DeliveryService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
