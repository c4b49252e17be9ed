// src/error.rs

//! Unified error handling for the notifier.

use std::fmt;

use thiserror::Error;

/// Result type alias for notifier operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Every failure a run, adapter, or the CLI can report.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Ledger blob or API reply was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Item/title/description selector did not parse
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Source page could not be fetched or parsed
    #[error("Document error for {url}: {message}")]
    Document { url: String, message: String },

    /// Key-value store rejected a request
    #[error("Store error: {0}")]
    Store(String),

    /// Mail API rejected a message
    #[error("Mail error: {0}")]
    Mail(String),

    /// Ledger could not be written back after a run
    #[error("Failed to persist ledger '{key}' after {notified} notification(s): {message}")]
    Persist {
        key: String,
        notified: usize,
        message: String,
    },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a document error with the page URL as context.
    pub fn document(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Document {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    pub fn mail(message: impl Into<String>) -> Self {
        Self::Mail(message.into())
    }
}
