//! Shared request-handling state.

use pong_core::{DeliveryService, SqliteNoteRepository};
use std::sync::Arc;
use std::time::Duration;

/// State cloned into every handler.
///
/// The delivery service is behind an `Arc` so the router and the
/// retention sweeper observe the same store.
#[derive(Clone)]
pub struct AppState {
    pub delivery: Arc<DeliveryService<SqliteNoteRepository>>,
    pub retention: Duration,
}

impl AppState {
    pub fn new(delivery: Arc<DeliveryService<SqliteNoteRepository>>, retention: Duration) -> Self {
        Self {
            delivery,
            retention,
        }
    }
}
