// src/pipeline/filter.rs

//! Promotion filter.

/// Decides which titles are worth a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionFilter {
    marker: String,
}

impl PromotionFilter {
    /// Accept titles containing `marker`.
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn is_promotion_worthy(&self, title: &str) -> bool {
        !title.is_empty() && title.contains(&self.marker)
    }
}

impl Default for PromotionFilter {
    fn default() -> Self {
        Self::new("50%")
    }
}
