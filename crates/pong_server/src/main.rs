//! `pongd` entry point.

use clap::Parser;
use log::{error, info};
use pong_core::db::open_db;
use pong_core::{init_logging, DeliveryService, NoteRepository, SqliteNoteRepository};
use pong_server::config::ServerConfig;
use pong_server::identity::GitHubIdentityResolver;
use pong_server::router::create_router;
use pong_server::state::AppState;
use pong_server::sweeper::RetentionSweeper;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    if let Err(err) = init_logging(&config.log_level, config.log_dir.as_deref()) {
        eprintln!("failed to initialize logging: {err}");
        std::process::exit(1);
    }

    if let Err(err) = run(config).await {
        error!("event=server_exit module=server status=error error={err}");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(&config.db_path)?;
    let repo = SqliteNoteRepository::new(conn);
    info!(
        "event=store_ready module=server status=ok db={} pending={}",
        config.db_path.display(),
        repo.pending_count()?
    );

    let identity = Arc::new(GitHubIdentityResolver::new(&config.github_api_url));
    let delivery = Arc::new(DeliveryService::new(repo, identity));

    let sweeper = RetentionSweeper::new(
        Arc::clone(&delivery),
        config.retention(),
        config.sweep_interval(),
    );
    tokio::spawn(sweeper.run());

    let state = AppState::new(delivery, config.retention());
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("event=listen module=server status=ok addr={addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
