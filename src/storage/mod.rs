//! Storage abstractions for the notification ledger.
//!
//! The ledger lives in a string-valued key-value store under
//! `"{prefix}{provider}"`. Backends:
//!
//! - `HookStore`: hook.io datastore over HTTP (production)
//! - `LocalStore`: one file per key on disk (development)
//! - `MemoryStore`: process memory (tests)

pub mod hook;
pub mod local;
pub mod memory;

use std::fmt;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::SentSet;

// Re-export for convenience
pub use hook::HookStore;
pub use local::LocalStore;
pub use memory::MemoryStore;

/// String-valued key-value store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `None` when the key has never been written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Where a loaded ledger came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOrigin {
    /// Parsed from the stored value
    Stored,
    /// Nothing stored yet
    Missing,
    /// Stored value could not be parsed; started empty
    Corrupt,
    /// Store could not be read; started empty
    Unavailable,
}

impl fmt::Display for LedgerOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LedgerOrigin::Stored => "stored",
            LedgerOrigin::Missing => "missing",
            LedgerOrigin::Corrupt => "corrupt",
            LedgerOrigin::Unavailable => "unavailable",
        };
        f.write_str(s)
    }
}

/// Loads and saves one provider's ledger.
pub struct SentSetStore<'a> {
    store: &'a dyn KeyValueStore,
    key: String,
}

impl<'a> SentSetStore<'a> {
    pub fn new(store: &'a dyn KeyValueStore, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the ledger. Never fails: an unreadable or unparseable value
    /// yields an empty ledger.
    pub async fn load(&self) -> (SentSet, LedgerOrigin) {
        let value = match self.store.get(&self.key).await {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Could not read ledger '{}': {}. Starting empty.", self.key, e);
                return (SentSet::new(), LedgerOrigin::Unavailable);
            }
        };

        let Some(blob) = value.filter(|v| !v.trim().is_empty()) else {
            log::info!("No ledger stored under '{}'", self.key);
            return (SentSet::new(), LedgerOrigin::Missing);
        };

        match SentSet::from_blob(&blob) {
            Ok(set) => (set, LedgerOrigin::Stored),
            Err(e) => {
                log::warn!("Ledger '{}' is unparseable: {}. Starting empty.", self.key, e);
                log::debug!("Unparseable ledger value: {}", blob);
                (SentSet::new(), LedgerOrigin::Corrupt)
            }
        }
    }

    /// Overwrite the stored ledger with `set`.
    pub async fn save(&self, set: &SentSet) -> Result<()> {
        let blob = set.to_blob()?;
        self.store.set(&self.key, &blob).await
    }
}
