// src/models/selectors.rs

//! CSS selectors for scraping a promotions page.

use serde::{Deserialize, Serialize};

/// CSS selectors for scraping a promotions page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemSelectors {
    /// Selector for each promotion item on the page
    #[serde(default = "default_item_selector")]
    pub item_selector: String,

    /// Selector for the title element within an item
    #[serde(default = "default_title_selector")]
    pub title_selector: String,

    /// Selector for the description element within an item
    #[serde(default = "default_description_selector")]
    pub description_selector: String,
}

fn default_item_selector() -> String {
    "div.news_items".to_string()
}

fn default_title_selector() -> String {
    "a.entry-title".to_string()
}

fn default_description_selector() -> String {
    "div.entry-summary".to_string()
}

impl Default for ItemSelectors {
    fn default() -> Self {
        Self {
            item_selector: default_item_selector(),
            title_selector: default_title_selector(),
            description_selector: default_description_selector(),
        }
    }
}

impl ItemSelectors {
    pub fn new(
        item: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            item_selector: item.into(),
            title_selector: title.into(),
            description_selector: description.into(),
        }
    }
}
