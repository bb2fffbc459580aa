//! Domain model exports for pong core.

pub mod note;
