//! Utility functions and helpers.

pub mod hash;
pub mod http;
pub mod text;

pub use hash::fingerprint;
pub use text::normalize_html;
