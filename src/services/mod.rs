//! Service layer for the notifier.
//!
//! This module contains the collaborators a run talks to:
//! - Page fetching (`DocumentSource`, `HttpDocumentSource`)
//! - Announcement extraction (`AnnouncementExtractor`)
//! - Mail delivery (`Notifier`, `MailgunNotifier`)
//! - Recipient list loading

mod document;
mod extractor;
mod mailgun;
mod recipients;

pub use document::{DocumentSource, HttpDocumentSource};
pub use extractor::AnnouncementExtractor;
pub use mailgun::{MailgunNotifier, Notifier};
pub use recipients::{load_recipients, parse_recipients};
