// src/models/mod.rs

//! Domain models for the notifier.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod announcement;
mod config;
mod context;
mod selectors;
mod sent_set;

// Re-export all public types
pub use announcement::Announcement;
pub use config::{
    Config, DatastoreConfig, FilterConfig, HttpConfig, LedgerConfig, MailgunConfig,
    ProviderConfig,
};
pub use context::RunContext;
pub use selectors::ItemSelectors;
pub use sent_set::SentSet;
