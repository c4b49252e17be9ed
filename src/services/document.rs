// src/services/document.rs

//! Promotions page source.

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::utils::http::read_body;

/// Fetches the markup of a promotions page.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Return the page body. Any failure aborts the run.
    async fn load(&self, url: &str) -> Result<String>;
}

/// Fetches pages over HTTP.
#[derive(Clone)]
pub struct HttpDocumentSource {
    client: reqwest::Client,
}

impl HttpDocumentSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    async fn load(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::document(url, e))?;
        read_body(response, |message| AppError::document(url, message)).await
    }
}
