//! Identity resolution contract.
//!
//! # Responsibility
//! - Define the capability the delivery service uses to turn an opaque
//!   credential into a stable username and to check recipient existence.
//!
//! # Invariants
//! - Rejection (`Unauthenticated`) and outage (`Unavailable`) are
//!   distinct outcomes; implementations perform no retries.
//! - Resolution happens before any store mutation.

use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure modes for identity resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Credential is absent, malformed, or rejected upstream.
    Unauthenticated,
    /// Upstream identity source unreachable or non-authoritative.
    Unavailable(String),
}

impl Display for IdentityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "credential rejected"),
            Self::Unavailable(details) => write!(f, "identity source unavailable: {details}"),
        }
    }
}

impl Error for IdentityError {}

/// External capability mapping opaque credentials to stable usernames.
///
/// Injected into the delivery service so core logic can be exercised
/// with a fake identity source and no network access.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolves a credential to the username owning it.
    async fn resolve(&self, credential: &str) -> Result<String, IdentityError>;
    /// Returns whether `username` exists at the identity source.
    async fn exists(&self, username: &str) -> Result<bool, IdentityError>;
}
