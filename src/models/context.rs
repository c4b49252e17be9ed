//! Immutable per-run context.

use crate::error::Result;
use crate::models::{Config, ItemSelectors};
use crate::pipeline::PromotionFilter;

/// Everything a single run needs, resolved once at start.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Provider name, scopes the ledger key
    pub provider: String,

    /// Promotions page URL
    pub page_url: String,

    pub selectors: ItemSelectors,

    /// Mail recipients; an empty list makes every send a no-op
    pub recipients: Vec<String>,

    pub filter: PromotionFilter,

    /// Prefix of the ledger key
    pub key_prefix: String,
}

impl RunContext {
    /// Build the context for `provider` from the loaded configuration.
    pub fn from_config(config: &Config, provider: &str, recipients: Vec<String>) -> Result<Self> {
        let provider_config = config.provider(provider)?;
        Ok(Self {
            provider: provider.to_string(),
            page_url: provider_config.url.clone(),
            selectors: provider_config.selectors.clone(),
            recipients,
            filter: PromotionFilter::new(&config.filter.marker),
            key_prefix: config.ledger.key_prefix.clone(),
        })
    }

    /// Key under which this provider's ledger is persisted.
    pub fn ledger_key(&self) -> String {
        format!("{}{}", self.key_prefix, self.provider)
    }
}
