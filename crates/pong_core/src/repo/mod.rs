//! Persistence layer for the note store.

pub mod note_repo;
