//! The notification ledger.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Fingerprint → Unix timestamp (UTC seconds) of the notification.
///
/// Entries are only ever added. The map is persisted as a JSON object;
/// a `BTreeMap` keeps the serialized form stable between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SentSet {
    entries: BTreeMap<String, i64>,
}

impl SentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, fingerprint: &str) -> bool {
        self.entries.contains_key(fingerprint)
    }

    /// Record a fingerprint. An existing entry keeps its first timestamp.
    pub fn insert(&mut self, fingerprint: impl Into<String>, sent_at: i64) {
        self.entries.entry(fingerprint.into()).or_insert(sent_at);
    }

    pub fn sent_at(&self, fingerprint: &str) -> Option<i64> {
        self.entries.get(fingerprint).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent notification time in the ledger.
    pub fn last_sent_at(&self) -> Option<i64> {
        self.entries.values().copied().max()
    }

    pub fn fingerprints(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Serialize to the persisted blob.
    pub fn to_blob(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a persisted blob.
    ///
    /// Anything other than a JSON object of integer timestamps is an error,
    /// so a corrupt value is distinguishable from an empty ledger (`{}`).
    /// Keys are upper-cased to match `fingerprint` output.
    pub fn from_blob(blob: &str) -> Result<Self> {
        let raw: BTreeMap<String, i64> = serde_json::from_str(blob)?;
        let mut set = Self::new();
        for (key, sent_at) in raw {
            set.insert(key.to_ascii_uppercase(), sent_at);
        }
        Ok(set)
    }
}
