//! hook.io datastore backend.
//!
//! ## Protocol
//!
//! - `GET {api_url}/get?key=..&hook_private_key=..` returns the value as a
//!   JSON string, or `null` when the key is unset.
//! - `POST {api_url}/set` with a form body (`key`, `value`,
//!   `hook_private_key`) returns `"OK"`.
//! - Failures come back as `{"error": true, "message": ".."}`.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::storage::KeyValueStore;
use crate::utils::http::read_body;

/// Datastore client authenticated with a hook private key.
#[derive(Clone)]
pub struct HookStore {
    client: reqwest::Client,
    api_url: String,
    private_key: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorReply {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    message: String,
}

impl HookStore {
    pub fn new(
        client: reqwest::Client,
        api_url: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Result<Self> {
        let private_key = private_key.into();
        if private_key.trim().is_empty() {
            return Err(AppError::config("Datastore private key is not set"));
        }
        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            private_key,
        })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/{}", self.api_url, action)
    }

    /// Reject `{"error": true, ..}` replies.
    fn check_error(body: &str) -> Result<()> {
        match serde_json::from_str::<ErrorReply>(body) {
            Ok(reply) if reply.error => Err(AppError::store(reply.message)),
            _ => Ok(()),
        }
    }

    /// Values come back JSON-quoted; anything that is not a JSON string is
    /// taken verbatim.
    fn unquote(body: &str) -> String {
        serde_json::from_str::<String>(body).unwrap_or_else(|_| body.to_string())
    }
}

#[async_trait]
impl KeyValueStore for HookStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get(self.endpoint("get"))
            .query(&[("key", key), ("hook_private_key", self.private_key.as_str())])
            .send()
            .await
            .map_err(|e| AppError::store(e.to_string()))?;
        let body = read_body(response, AppError::Store).await?;
        Self::check_error(&body)?;

        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(None);
        }
        Ok(Some(Self::unquote(trimmed)))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint("set"))
            .form(&[
                ("key", key),
                ("value", value),
                ("hook_private_key", self.private_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::store(e.to_string()))?;
        let body = read_body(response, AppError::Store).await?;
        Self::check_error(&body)?;

        let reply = Self::unquote(body.trim());
        if reply == "OK" {
            Ok(())
        } else {
            Err(AppError::store(reply))
        }
    }
}
