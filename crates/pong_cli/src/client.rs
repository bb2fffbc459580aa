//! HTTP client for the pong server wire contract.

use serde::Deserialize;
use serde_json::json;

/// One note as the server returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct NoteView {
    pub from_user: String,
    pub message: String,
    #[allow(dead_code)]
    pub created_at: i64,
}

/// Leaves a note for `to_user`; the server replies 201 on success.
pub async fn send_note(
    server: &str,
    token: &str,
    to_user: &str,
    message: &str,
) -> Result<(), String> {
    let response = reqwest::Client::new()
        .post(format!("{}/pong", server.trim_end_matches('/')))
        .json(&json!({ "to_user": to_user, "message": message, "token": token }))
        .send()
        .await
        .map_err(|err| format!("failed to reach server: {err}"))?;

    if response.status() != reqwest::StatusCode::CREATED {
        return Err(server_error_text(response).await);
    }
    Ok(())
}

/// Drains the caller's inbox.
pub async fn fetch_notes(server: &str, token: &str) -> Result<Vec<NoteView>, String> {
    let response = reqwest::Client::new()
        .get(format!("{}/pongs", server.trim_end_matches('/')))
        .bearer_auth(token)
        .send()
        .await
        .map_err(|err| format!("failed to reach server: {err}"))?;

    if !response.status().is_success() {
        return Err(server_error_text(response).await);
    }
    response
        .json::<Vec<NoteView>>()
        .await
        .map_err(|err| format!("failed to parse server response: {err}"))
}

/// Extracts the server's error message, falling back to the status.
async fn server_error_text(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("message")
            .and_then(|message| message.as_str())
            .map(|message| message.to_string())
            .unwrap_or_else(|| format!("server returned {status}")),
        Err(_) => format!("server returned {status}"),
    }
}
