//! Note domain model.
//!
//! # Responsibility
//! - Define the single persisted entity: one ephemeral note from a sender
//!   to a recipient.
//! - Validate note bodies and username shape before persistence.
//!
//! # Invariants
//! - `id` is store-assigned, unique, and never reused.
//! - `created_at` is epoch milliseconds assigned by the store at insert.
//! - A body is valid iff it holds 1..=140 Unicode scalar values.
//!
//! # See also
//! - docs/architecture/data-model.md

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for one note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Values are store-assigned rowids: opaque, unique, monotonically
/// increasing.
pub type NoteId = i64;

/// Maximum note body length in Unicode scalar values.
pub const MAX_BODY_CHARS: usize = 140;

/// Maximum username length accepted by the shape check.
pub const MAX_USERNAME_CHARS: usize = 39;

// Alphanumeric runs separated by single hyphens, no leading or trailing
// hyphen. Length is checked separately.
static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9](?:-?[A-Za-z0-9])*$").expect("valid username regex"));

/// One ephemeral message from a sender to a recipient.
///
/// Notes are immutable once created: a re-send for the same pair replaces
/// the stored row wholesale instead of mutating it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned stable id.
    pub id: NoteId,
    /// Resolved sender username.
    pub sender: String,
    /// Recipient username.
    pub recipient: String,
    /// Message text, 1..=140 characters.
    pub body: String,
    /// Insertion timestamp in epoch milliseconds.
    pub created_at: i64,
}

/// Validation error for note input fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Body holds zero characters.
    EmptyBody,
    /// Body exceeds `MAX_BODY_CHARS`.
    BodyTooLong { chars: usize },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyBody => write!(f, "note body is empty"),
            Self::BodyTooLong { chars } => write!(
                f,
                "note body is {chars} characters, maximum is {MAX_BODY_CHARS}"
            ),
        }
    }
}

impl Error for NoteValidationError {}

/// Validates a note body against the 1..=140 character contract.
///
/// Length is counted in Unicode scalar values, not bytes.
pub fn validate_body(body: &str) -> Result<(), NoteValidationError> {
    let chars = body.chars().count();
    if chars == 0 {
        return Err(NoteValidationError::EmptyBody);
    }
    if chars > MAX_BODY_CHARS {
        return Err(NoteValidationError::BodyTooLong { chars });
    }
    Ok(())
}

/// Returns whether `value` has the shape of a valid username.
///
/// Shape-only check used to reject obviously bad recipients before the
/// identity source is consulted; existence stays the resolver's call.
pub fn is_valid_username_shape(value: &str) -> bool {
    value.chars().count() <= MAX_USERNAME_CHARS && USERNAME_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::{is_valid_username_shape, validate_body, NoteValidationError, MAX_BODY_CHARS};

    #[test]
    fn validate_body_accepts_boundary_lengths() {
        assert!(validate_body("x").is_ok());
        assert!(validate_body(&"y".repeat(MAX_BODY_CHARS)).is_ok());
    }

    #[test]
    fn validate_body_rejects_empty_and_overlong() {
        assert_eq!(validate_body(""), Err(NoteValidationError::EmptyBody));
        assert_eq!(
            validate_body(&"z".repeat(MAX_BODY_CHARS + 1)),
            Err(NoteValidationError::BodyTooLong {
                chars: MAX_BODY_CHARS + 1
            })
        );
    }

    #[test]
    fn validate_body_counts_characters_not_bytes() {
        // 140 multibyte characters are exactly at the limit.
        let body = "\u{00e9}".repeat(MAX_BODY_CHARS);
        assert!(body.len() > MAX_BODY_CHARS);
        assert!(validate_body(&body).is_ok());
    }

    #[test]
    fn username_shape_accepts_plain_and_hyphenated_names() {
        assert!(is_valid_username_shape("octocat"));
        assert!(is_valid_username_shape("a"));
        assert!(is_valid_username_shape("mona-lisa-99"));
    }

    #[test]
    fn username_shape_rejects_malformed_names() {
        assert!(!is_valid_username_shape(""));
        assert!(!is_valid_username_shape("-octocat"));
        assert!(!is_valid_username_shape("octocat-"));
        assert!(!is_valid_username_shape("mona--lisa"));
        assert!(!is_valid_username_shape("name with spaces"));
        assert!(!is_valid_username_shape(&"a".repeat(40)));
    }
}
