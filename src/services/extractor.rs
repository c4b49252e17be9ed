// src/services/extractor.rs

//! Announcement extraction.
//!
//! Reads promotion items out of a parsed page using the configured CSS
//! selectors.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Announcement, ItemSelectors};
use crate::utils::normalize_html;

/// Extracts announcements from a promotions page.
#[derive(Debug)]
pub struct AnnouncementExtractor {
    item: Selector,
    title: Selector,
    description: Selector,
}

impl AnnouncementExtractor {
    /// Compile the selectors. Any invalid selector is an error.
    pub fn new(selectors: &ItemSelectors) -> Result<Self> {
        Ok(Self {
            item: Self::parse_selector(&selectors.item_selector)?,
            title: Self::parse_selector(&selectors.title_selector)?,
            description: Self::parse_selector(&selectors.description_selector)?,
        })
    }

    /// Announcements in document order.
    ///
    /// Items without a title element, or whose title is blank once
    /// normalized, are skipped.
    pub fn extract<'a>(&'a self, document: &'a Html) -> impl Iterator<Item = Announcement> + 'a {
        document
            .select(&self.item)
            .filter_map(move |item| self.parse_item(item))
    }

    fn parse_item(&self, item: ElementRef<'_>) -> Option<Announcement> {
        let title_elem = item.select(&self.title).next()?;
        let title = normalize_html(&title_elem.inner_html());
        if title.is_empty() {
            log::debug!(
                "Skipping item with empty title: {}",
                normalize_html(&item.inner_html())
            );
            return None;
        }

        let description = item
            .select(&self.description)
            .next()
            .map(|elem| normalize_html(&elem.inner_html()))
            .unwrap_or_default();

        Some(Announcement { title, description })
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}
