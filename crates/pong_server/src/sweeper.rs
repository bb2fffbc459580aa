//! Background retention sweeper.
//!
//! # Responsibility
//! - Purge notes older than the retention window on a fixed cadence.
//!
//! # Invariants
//! - A failed sweep ends that tick only; the loop keeps running.

use log::{error, info};
use pong_core::{DeliveryService, NoteRepository};
use std::sync::Arc;
use std::time::Duration;

/// Periodic purge task over the shared delivery service.
pub struct RetentionSweeper<R: NoteRepository + 'static> {
    delivery: Arc<DeliveryService<R>>,
    retention: Duration,
    interval: Duration,
}

impl<R: NoteRepository + 'static> RetentionSweeper<R> {
    pub fn new(delivery: Arc<DeliveryService<R>>, retention: Duration, interval: Duration) -> Self {
        Self {
            delivery,
            retention,
            interval,
        }
    }

    /// Runs the sweep loop indefinitely. Spawn it as a task:
    ///
    /// ```ignore
    /// tokio::spawn(sweeper.run());
    /// ```
    pub async fn run(self) {
        info!(
            "event=sweeper_start module=sweeper status=ok retention_secs={} interval_secs={}",
            self.retention.as_secs(),
            self.interval.as_secs()
        );

        // The first tick fires immediately, so stale rows do not
        // outlive a restart by a further interval.
        let mut interval = tokio::time::interval(self.interval);
        loop {
            interval.tick().await;
            match self.delivery.clear_old(self.retention) {
                Ok(removed) => {
                    info!("event=sweep_tick module=sweeper status=ok removed={removed}");
                }
                Err(err) => {
                    error!("event=sweep_tick module=sweeper status=error error={err}");
                }
            }
        }
    }
}
