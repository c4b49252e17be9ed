//! Announcement data structure.

use serde::{Deserialize, Serialize};

use crate::utils::hash::fingerprint;

/// A promotional item extracted from a provider page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Announcement {
    /// Normalized title, never empty
    pub title: String,

    /// Normalized description, empty when the item has none
    pub description: String,
}

impl Announcement {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Ledger key for this announcement.
    ///
    /// Hashes the raw `title + description` pair. The description is taken
    /// as extracted, before the body falls back to the title, so an item
    /// without a description never collides with one whose description
    /// repeats its title.
    pub fn fingerprint(&self) -> String {
        let mut content = String::with_capacity(self.title.len() + self.description.len());
        content.push_str(&self.title);
        content.push_str(&self.description);
        fingerprint(&content)
    }

    /// Mail subject.
    pub fn subject(&self) -> &str {
        &self.title
    }

    /// Mail body: the description, or the title when there is none.
    pub fn body(&self) -> &str {
        if self.description.is_empty() {
            &self.title
        } else {
            &self.description
        }
    }
}
