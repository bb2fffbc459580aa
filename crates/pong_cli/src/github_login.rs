//! GitHub device-flow login.
//!
//! Implements the OAuth device authorization grant against github.com:
//! request a user code, tell the user where to enter it, then poll the
//! token endpoint until GitHub reports a decision.

use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const DEVICE_CODE_URL: &str = "https://github.com/login/device/code";
const ACCESS_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";
const SCOPE: &str = "read:user";

#[derive(Debug, Deserialize)]
struct DeviceCodeResponse {
    device_code: String,
    user_code: String,
    verification_uri: String,
    interval: u64,
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

/// Runs the device flow and returns the granted access token.
pub async fn device_flow_login(client_id: &str) -> Result<String, String> {
    let http = reqwest::Client::new();

    let device: DeviceCodeResponse = http
        .post(DEVICE_CODE_URL)
        .header(ACCEPT, "application/json")
        .json(&json!({ "client_id": client_id, "scope": SCOPE }))
        .send()
        .await
        .map_err(|err| format!("failed to reach GitHub: {err}"))?
        .json()
        .await
        .map_err(|err| format!("unexpected device code response: {err}"))?;

    println!(
        "Visit {} and enter code: {}",
        device.verification_uri, device.user_code
    );

    let mut interval = Duration::from_secs(device.interval.max(1));
    loop {
        tokio::time::sleep(interval).await;

        let poll: AccessTokenResponse = http
            .post(ACCESS_TOKEN_URL)
            .header(ACCEPT, "application/json")
            .json(&json!({
                "client_id": client_id,
                "device_code": device.device_code,
                "grant_type": GRANT_TYPE,
            }))
            .send()
            .await
            .map_err(|err| format!("failed to reach GitHub: {err}"))?
            .json()
            .await
            .map_err(|err| format!("unexpected token response: {err}"))?;

        if let Some(token) = poll.access_token {
            return Ok(token);
        }

        match poll.error.as_deref() {
            Some("authorization_pending") => {}
            // GitHub asks for a slower poll rate.
            Some("slow_down") => interval += Duration::from_secs(5),
            Some("expired_token") => {
                return Err("login code expired; run `pong login` again".to_string())
            }
            Some("access_denied") => return Err("login was denied".to_string()),
            Some(other) => return Err(format!("GitHub returned error `{other}`")),
            None => return Err("GitHub returned neither a token nor an error".to_string()),
        }
    }
}
