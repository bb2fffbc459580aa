#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use pong_core::db::open_db;
use pong_core::{DeliveryService, IdentityError, IdentityResolver, SqliteNoteRepository};
use pong_server::router::create_router;
use pong_server::state::AppState;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Identity source backed by a fixed username set; credentials look
/// like `tok-<name>`.
pub struct StaticResolver {
    users: HashSet<String>,
}

impl StaticResolver {
    pub fn with_users(users: &[&str]) -> Self {
        Self {
            users: users.iter().map(|name| (*name).to_string()).collect(),
        }
    }
}

#[async_trait]
impl IdentityResolver for StaticResolver {
    async fn resolve(&self, credential: &str) -> Result<String, IdentityError> {
        match credential.strip_prefix("tok-") {
            Some(name) if self.users.contains(name) => Ok(name.to_string()),
            _ => Err(IdentityError::Unauthenticated),
        }
    }

    async fn exists(&self, username: &str) -> Result<bool, IdentityError> {
        Ok(self.users.contains(username))
    }
}

/// Binds `app` on an ephemeral local port and serves it in the
/// background for the rest of the test.
pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind should succeed");
    let addr = listener.local_addr().expect("local addr should resolve");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server should run");
    });
    addr
}

/// Full application over a fresh on-disk store and a static identity
/// set, with a one-week retention window.
pub async fn spawn_app(db_path: &Path, users: &[&str]) -> SocketAddr {
    let conn = open_db(db_path).expect("db should open");
    let delivery = Arc::new(DeliveryService::new(
        SqliteNoteRepository::new(conn),
        Arc::new(StaticResolver::with_users(users)),
    ));
    let state = AppState::new(delivery, Duration::from_secs(7 * 86_400));
    spawn_server(create_router(state)).await
}

/// Returns the credential that `StaticResolver` maps to `name`.
pub fn token(name: &str) -> String {
    format!("tok-{name}")
}
