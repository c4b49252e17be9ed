// src/pipeline/dedup.rs

//! Dedup gate.
//!
//! An announcement is new until its fingerprint is in the ledger. Matching
//! is exact set membership and entries never expire.

use crate::models::{Announcement, SentSet};

/// Whether `announcement` has not been notified yet.
pub fn should_notify(announcement: &Announcement, sent: &SentSet) -> bool {
    !sent.contains(&announcement.fingerprint())
}

/// Record `announcement` as notified at `now` (Unix seconds, UTC).
///
/// Call only after the notification was delivered.
pub fn record_sent(announcement: &Announcement, sent: &mut SentSet, now: i64) {
    sent.insert(announcement.fingerprint(), now);
}
