//! Use-case services over the note store.

pub mod delivery_service;
