//! Pipeline entry points.
//!
//! - `run_notifier`: one fetch → extract → filter → dedup → notify → persist pass

pub mod dedup;
pub mod filter;
pub mod notify;
pub mod report;

pub use dedup::{record_sent, should_notify};
pub use filter::PromotionFilter;
pub use notify::run_notifier;
pub use report::{RunReport, RunState};
