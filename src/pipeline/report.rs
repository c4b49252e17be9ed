//! Run state and summary.

use std::fmt;

use crate::storage::LedgerOrigin;

/// Phases of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    DocumentLoaded,
    SentSetLoaded,
    Iterating,
    Finalizing,
    Done,
    Aborted,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Counters for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub provider: String,

    /// Announcements extracted from the page
    pub candidates: usize,

    /// Candidates accepted by the promotion filter
    pub promotions: usize,

    /// Promotions skipped because they were already in the ledger
    pub already_notified: usize,

    /// Promotions delivered and recorded in this run
    pub notified: usize,

    /// Promotions whose delivery failed; retried next run
    pub failed: usize,

    pub ledger_origin: LedgerOrigin,

    /// Ledger entries after the run
    pub ledger_size: usize,

    pub state: RunState,
}

impl RunReport {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            candidates: 0,
            promotions: 0,
            already_notified: 0,
            notified: 0,
            failed: 0,
            ledger_origin: LedgerOrigin::Missing,
            ledger_size: 0,
            state: RunState::Init,
        }
    }

    pub(crate) fn advance(&mut self, next: RunState) {
        log::debug!("Run state: {} -> {}", self.state, next);
        self.state = next;
    }

    /// Summary rows for display.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Provider", self.provider.clone()),
            ("Candidates", self.candidates.to_string()),
            ("Promotions", self.promotions.to_string()),
            ("Already notified", self.already_notified.to_string()),
            ("Notified", self.notified.to_string()),
            ("Failed", self.failed.to_string()),
            ("Ledger", format!("{} entries ({})", self.ledger_size, self.ledger_origin)),
        ]
    }
}
