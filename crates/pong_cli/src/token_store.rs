//! Local credential storage under `~/.pong/`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Returns the directory the client keeps its state in.
pub fn default_state_dir() -> Result<PathBuf, String> {
    dirs::home_dir()
        .map(|home| home.join(".pong"))
        .ok_or_else(|| "cannot determine home directory".to_string())
}

pub fn load_token() -> Result<String, String> {
    load_token_from(&default_state_dir()?.join("token"))
}

pub fn save_token(token: &str) -> Result<(), String> {
    save_token_to(&default_state_dir()?.join("token"), token)
}

fn load_token_from(path: &Path) -> Result<String, String> {
    match fs::read_to_string(path) {
        Ok(token) => Ok(token.trim().to_string()),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Err("not logged in. Run `pong login` first".to_string())
        }
        Err(err) => Err(format!("failed to read credential: {err}")),
    }
}

fn save_token_to(path: &Path, token: &str) -> Result<(), String> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .map_err(|err| format!("failed to create {}: {err}", dir.display()))?;
    }
    fs::write(path, token).map_err(|err| format!("failed to save credential: {err}"))?;

    // The credential is a live GitHub token; keep it owner-only.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|err| format!("failed to restrict credential permissions: {err}"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_token_from, save_token_to};

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");

        save_token_to(&path, "ghp_abc123").unwrap();
        assert_eq!(load_token_from(&path).unwrap(), "ghp_abc123");
    }

    #[test]
    fn load_without_a_saved_token_tells_the_user_to_log_in() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_token_from(&dir.path().join("token")).unwrap_err();
        assert!(err.contains("pong login"));
    }

    #[test]
    fn load_trims_a_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "ghp_abc123\n").unwrap();

        assert_eq!(load_token_from(&path).unwrap(), "ghp_abc123");
    }

    #[cfg(unix)]
    #[test]
    fn saved_token_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        save_token_to(&path, "ghp_abc123").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
