//! Server configuration.
//!
//! # Responsibility
//! - Define the command line and environment surface of `pongd`.
//! - Convert the day and hour settings into durations for the sweeper.

use clap::Parser;
use pong_core::default_log_level;
use std::path::PathBuf;
use std::time::Duration;

const DAY_SECS: u64 = 86_400;
const HOUR_SECS: u64 = 3_600;

/// Command line and environment configuration for `pongd`.
///
/// Every flag can also be supplied through the environment, so the
/// binary runs unchanged under a process supervisor.
#[derive(Clone, Debug, Parser)]
#[command(name = "pongd", version, about = "Ephemeral single-slot mailbox server")]
pub struct ServerConfig {
    /// Port the HTTP listener binds on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Path of the SQLite database file.
    #[arg(long, env = "PONG_DB", default_value = "pongs.db")]
    pub db_path: PathBuf,

    /// Notes older than this many days are purged by the sweeper.
    #[arg(long, env = "PONG_RETENTION_DAYS", default_value_t = 7)]
    pub retention_days: u64,

    /// Hours between retention sweeps.
    #[arg(long, env = "PONG_SWEEP_INTERVAL_HOURS", default_value_t = 24)]
    pub sweep_interval_hours: u64,

    /// Base URL of the identity API.
    #[arg(long, env = "PONG_GITHUB_API", default_value = "https://api.github.com")]
    pub github_api_url: String,

    /// Directory for rotated log files; stderr when unset.
    #[arg(long, env = "PONG_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, env = "PONG_LOG_LEVEL", default_value_t = default_log_level().to_string())]
    pub log_level: String,
}

impl ServerConfig {
    /// Retention window as a duration.
    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.retention_days * DAY_SECS)
    }

    /// Sweep cadence as a duration.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_hours * HOUR_SECS)
    }
}
