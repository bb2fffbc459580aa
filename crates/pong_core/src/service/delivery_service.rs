//! Delivery use-case service.
//!
//! # Responsibility
//! - Orchestrate send/fetch/clear against the note store.
//! - Enforce the operation order: identity first, validation next,
//!   store mutation last.
//!
//! # Invariants
//! - A store mutation never precedes successful identity resolution.
//! - `fetch` drains the whole inbox; an empty inbox is success, not an
//!   error.
//! - `clear_old` is the single purge path shared by the scheduler and
//!   manual triggers.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::identity::{IdentityError, IdentityResolver};
use crate::model::note::{
    is_valid_username_shape, validate_body, Note, NoteId, NoteValidationError, MAX_BODY_CHARS,
};
use crate::repo::note_repo::{NoteRepository, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Service error for delivery use-cases.
#[derive(Debug)]
pub enum DeliveryError {
    /// Sender or recipient credential was rejected.
    Unauthenticated,
    /// Identity source could not give an authoritative answer.
    IdentityUnavailable(String),
    /// Target username does not exist.
    UnknownRecipient(String),
    /// Message body holds zero characters.
    MessageEmpty,
    /// Message body exceeds the 140-character bound.
    MessageTooLong { chars: usize },
    /// Persistence-layer failure.
    Store(RepoError),
}

impl Display for DeliveryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "credential rejected"),
            Self::IdentityUnavailable(details) => {
                write!(f, "identity source unavailable: {details}")
            }
            Self::UnknownRecipient(name) => write!(f, "unknown recipient: `{name}`"),
            Self::MessageEmpty => write!(f, "message is empty"),
            Self::MessageTooLong { chars } => {
                write!(f, "message is {chars} characters, maximum is {MAX_BODY_CHARS}")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DeliveryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for DeliveryError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

impl From<IdentityError> for DeliveryError {
    fn from(value: IdentityError) -> Self {
        match value {
            IdentityError::Unauthenticated => Self::Unauthenticated,
            IdentityError::Unavailable(details) => Self::IdentityUnavailable(details),
        }
    }
}

impl From<NoteValidationError> for DeliveryError {
    fn from(value: NoteValidationError) -> Self {
        match value {
            NoteValidationError::EmptyBody => Self::MessageEmpty,
            NoteValidationError::BodyTooLong { chars } => Self::MessageTooLong { chars },
        }
    }
}

/// Delivery service facade over a note repository and identity resolver.
pub struct DeliveryService<R: NoteRepository> {
    repo: R,
    identity: Arc<dyn IdentityResolver>,
}

impl<R: NoteRepository> DeliveryService<R> {
    /// Creates a service using the provided repository and resolver.
    pub fn new(repo: R, identity: Arc<dyn IdentityResolver>) -> Self {
        Self { repo, identity }
    }

    /// Sends one note, superseding any pending note for the same pair.
    ///
    /// Order of checks: sender resolution, body validation, recipient
    /// existence, store upsert. A failed check leaves the store
    /// untouched.
    pub async fn send(
        &self,
        credential: &str,
        recipient: &str,
        body: &str,
    ) -> Result<NoteId, DeliveryError> {
        let sender = self.identity.resolve(credential).await?;
        validate_body(body)?;
        if !is_valid_username_shape(recipient) {
            return Err(DeliveryError::UnknownRecipient(recipient.to_string()));
        }
        if !self.identity.exists(recipient).await? {
            return Err(DeliveryError::UnknownRecipient(recipient.to_string()));
        }

        let note_id = self.repo.upsert_note(&sender, recipient, body)?;
        info!(
            "event=note_sent module=delivery status=ok note_id={note_id} sender={sender} recipient={recipient}"
        );
        Ok(note_id)
    }

    /// Drains and returns the caller's inbox, newest first.
    ///
    /// Every returned note is already deleted from the store; a lost
    /// response cannot resurrect it.
    pub async fn fetch(&self, credential: &str) -> Result<Vec<Note>, DeliveryError> {
        let recipient = self.identity.resolve(credential).await?;
        let notes = self.repo.drain_for_recipient(&recipient)?;
        info!(
            "event=inbox_drained module=delivery status=ok recipient={recipient} count={}",
            notes.len()
        );
        Ok(notes)
    }

    /// Deletes notes older than `retention`, returning the count removed.
    ///
    /// The background sweeper and the manual clear endpoint both call
    /// exactly this method, so scheduled and on-demand purges share one
    /// implementation.
    pub fn clear_old(&self, retention: Duration) -> Result<u64, DeliveryError> {
        let retention_ms = i64::try_from(retention.as_millis()).unwrap_or(i64::MAX);
        let cutoff_ms = now_epoch_ms().saturating_sub(retention_ms);
        let removed = self.repo.purge_expired(cutoff_ms)?;
        if removed > 0 {
            info!("event=retention_purge module=delivery status=ok removed={removed}");
        }
        Ok(removed)
    }
}

// A clock before the epoch yields cutoff <= 0, which purges nothing.
fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
