//! GitHub-backed identity source.
//!
//! # Responsibility
//! - Resolve personal access tokens to usernames via `GET /user`.
//! - Answer recipient existence via `GET /users/{name}`.
//!
//! # Invariants
//! - 401 and 403 from the API mean the credential is bad; any other
//!   unexpected outcome means the API itself is unavailable.

use async_trait::async_trait;
use pong_core::{IdentityError, IdentityResolver};
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

// GitHub rejects requests without a User-Agent.
const USER_AGENT_VALUE: &str = "pong-server";

#[derive(Debug, Deserialize)]
struct GitHubUser {
    login: String,
}

/// Identity resolver backed by the GitHub REST API.
///
/// `base_url` is injectable so tests can point the resolver at a stub
/// server.
pub struct GitHubIdentityResolver {
    http: Client,
    base_url: String,
}

impl GitHubIdentityResolver {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl IdentityResolver for GitHubIdentityResolver {
    async fn resolve(&self, credential: &str) -> Result<String, IdentityError> {
        let response = self
            .http
            .get(format!("{}/user", self.base_url))
            .header(AUTHORIZATION, format!("token {credential}"))
            .header(USER_AGENT, USER_AGENT_VALUE)
            .send()
            .await
            .map_err(|err| IdentityError::Unavailable(err.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let user: GitHubUser = response
                    .json()
                    .await
                    .map_err(|err| IdentityError::Unavailable(err.to_string()))?;
                Ok(user.login)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(IdentityError::Unauthenticated),
            status => Err(IdentityError::Unavailable(format!(
                "identity api returned {status}"
            ))),
        }
    }

    async fn exists(&self, username: &str) -> Result<bool, IdentityError> {
        let response = self
            .http
            .get(format!("{}/users/{username}", self.base_url))
            .header(USER_AGENT, USER_AGENT_VALUE)
            .send()
            .await
            .map_err(|err| IdentityError::Unavailable(err.to_string()))?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(IdentityError::Unavailable(format!(
                "identity api returned {status}"
            ))),
        }
    }
}
