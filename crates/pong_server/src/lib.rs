//! HTTP front end for the pong mailbox service.
//!
//! # Responsibility
//! - Translate the wire contract (`POST /pong`, `GET /pongs`,
//!   `POST /clear`) into [`pong_core`] delivery calls.
//! - Map delivery failures onto HTTP statuses and JSON error bodies.
//! - Run the background retention sweeper.
//!
//! # See also
//! - docs/architecture/wire-contract.md

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod router;
pub mod state;
pub mod sweeper;
