//! Local fetch history under `~/.pong/history.json`.
//!
//! The server hands each note out exactly once, so everything a fetch
//! returns is appended here before display.

use crate::client::NoteView;
use crate::token_store::default_state_dir;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One remembered note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub from_user: String,
    pub message: String,
    pub fetched_at: DateTime<Utc>,
}

pub fn default_history_path() -> Result<PathBuf, String> {
    Ok(default_state_dir()?.join("history.json"))
}

/// Loads history; a missing file is an empty history.
pub fn load_history(path: &Path) -> Result<Vec<HistoryEntry>, String> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(format!("failed to read history: {err}")),
    };
    serde_json::from_str(&data).map_err(|err| format!("failed to parse history: {err}"))
}

/// Appends freshly fetched notes, stamped with the fetch time.
pub fn append_fetch(path: &Path, notes: &[NoteView]) -> Result<(), String> {
    if notes.is_empty() {
        return Ok(());
    }

    let mut entries = load_history(path)?;
    let fetched_at = Utc::now();
    entries.extend(notes.iter().map(|note| HistoryEntry {
        from_user: note.from_user.clone(),
        message: note.message.clone(),
        fetched_at,
    }));

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .map_err(|err| format!("failed to create {}: {err}", dir.display()))?;
    }
    let data = serde_json::to_string_pretty(&entries)
        .map_err(|err| format!("failed to encode history: {err}"))?;
    fs::write(path, data).map_err(|err| format!("failed to write history: {err}"))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|err| format!("failed to restrict history permissions: {err}"))?;
    }

    Ok(())
}

/// Removes the history file; returns whether one existed.
pub fn clear(path: &Path) -> Result<bool, String> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
        Err(err) => Err(format!("failed to clear history: {err}")),
    }
}
