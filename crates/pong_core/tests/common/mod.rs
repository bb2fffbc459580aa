#![allow(dead_code)]

use async_trait::async_trait;
use pong_core::db::open_db_in_memory;
use pong_core::{DeliveryService, IdentityError, IdentityResolver, SqliteNoteRepository};
use std::collections::HashSet;
use std::sync::Arc;

/// Identity source backed by a fixed username set.
///
/// Credentials of the form `tok-<name>` resolve to `<name>` when the
/// name is known; anything else is rejected.
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

/// Identity source whose upstream is entirely down.
pub struct OutageResolver;

#[async_trait]
impl IdentityResolver for OutageResolver {
    async fn resolve(&self, _credential: &str) -> Result<String, IdentityError> {
        Err(IdentityError::Unavailable("connection refused".to_string()))
    }

    async fn exists(&self, _username: &str) -> Result<bool, IdentityError> {
        Err(IdentityError::Unavailable("connection refused".to_string()))
    }
}

/// Identity source where credential resolution works but existence
/// lookups are down.
pub struct ExistsOutageResolver;

#[async_trait]
impl IdentityResolver for ExistsOutageResolver {
    async fn resolve(&self, credential: &str) -> Result<String, IdentityError> {
        match credential.strip_prefix("tok-") {
            Some(name) => Ok(name.to_string()),
            None => Err(IdentityError::Unauthenticated),
        }
    }

    async fn exists(&self, _username: &str) -> Result<bool, IdentityError> {
        Err(IdentityError::Unavailable("users endpoint down".to_string()))
    }
}

/// Builds a delivery service over a fresh in-memory store.
pub fn memory_service(users: &[&str]) -> DeliveryService<SqliteNoteRepository> {
    service_with_resolver(Arc::new(StaticResolver::with_users(users)))
}

/// Builds a delivery service over a fresh in-memory store with a
/// caller-chosen resolver.
pub fn service_with_resolver(
    resolver: Arc<dyn IdentityResolver>,
) -> DeliveryService<SqliteNoteRepository> {
    let conn = open_db_in_memory().expect("in-memory db should open");
    DeliveryService::new(SqliteNoteRepository::new(conn), resolver)
}

/// Returns the credential that `StaticResolver` maps to `name`.
pub fn token(name: &str) -> String {
    format!("tok-{name}")
}
