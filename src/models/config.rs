//! Application configuration structures.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::ItemSelectors;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Notification ledger settings
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Promotion filter rule
    #[serde(default)]
    pub filter: FilterConfig,

    /// Mailgun endpoint and sender
    #[serde(default)]
    pub mailgun: MailgunConfig,

    /// Remote datastore endpoint
    #[serde(default)]
    pub datastore: DatastoreConfig,

    /// Provider pages keyed by provider name
    #[serde(default = "defaults::providers")]
    pub providers: BTreeMap<String, ProviderConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Look up a provider by name.
    pub fn provider(&self, name: &str) -> Result<&ProviderConfig> {
        self.providers
            .get(name)
            .ok_or_else(|| AppError::config(format!("Provider '{name}' is not supported")))
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.ledger.key_prefix.is_empty() {
            return Err(AppError::validation("ledger.key_prefix is empty"));
        }
        if self.filter.marker.is_empty() {
            return Err(AppError::validation("filter.marker is empty"));
        }
        if self.mailgun.from.trim().is_empty() {
            return Err(AppError::validation("mailgun.from is empty"));
        }
        url::Url::parse(&self.mailgun.api_base)?;
        url::Url::parse(&self.datastore.api_url)?;
        if self.providers.is_empty() {
            return Err(AppError::validation("No providers defined"));
        }
        for (name, provider) in &self.providers {
            url::Url::parse(&provider.url).map_err(|e| {
                AppError::validation(format!("providers.{name}.url is invalid: {e}"))
            })?;
            for (field, value) in [
                ("item_selector", &provider.selectors.item_selector),
                ("title_selector", &provider.selectors.title_selector),
                ("description_selector", &provider.selectors.description_selector),
            ] {
                if value.trim().is_empty() {
                    return Err(AppError::validation(format!(
                        "providers.{name}.{field} is empty"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            ledger: LedgerConfig::default(),
            filter: FilterConfig::default(),
            mailgun: MailgunConfig::default(),
            datastore: DatastoreConfig::default(),
            providers: defaults::providers(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Ledger persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Prefix for the per-provider ledger key
    #[serde(default = "defaults::key_prefix")]
    pub key_prefix: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            key_prefix: defaults::key_prefix(),
        }
    }
}

/// Promotion filter rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Substring a title must contain to be notified
    #[serde(default = "defaults::marker")]
    pub marker: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            marker: defaults::marker(),
        }
    }
}

/// Mailgun settings. The API key is supplied at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailgunConfig {
    #[serde(default = "defaults::mailgun_api_base")]
    pub api_base: String,

    /// Sending domain, may be overridden from the command line
    #[serde(default)]
    pub domain: String,

    /// Sender address
    #[serde(default = "defaults::mail_from")]
    pub from: String,
}

impl Default for MailgunConfig {
    fn default() -> Self {
        Self {
            api_base: defaults::mailgun_api_base(),
            domain: String::new(),
            from: defaults::mail_from(),
        }
    }
}

/// Remote datastore settings. The private key is supplied at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatastoreConfig {
    #[serde(default = "defaults::datastore_api_url")]
    pub api_url: String,
}

impl Default for DatastoreConfig {
    fn default() -> Self {
        Self {
            api_url: defaults::datastore_api_url(),
        }
    }
}

/// A promotions page and how to read it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderConfig {
    /// URL of the promotions listing page
    pub url: String,

    #[serde(flatten)]
    pub selectors: ItemSelectors,
}

impl ProviderConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            selectors: ItemSelectors::default(),
        }
    }
}

mod defaults {
    use std::collections::BTreeMap;

    use super::ProviderConfig;

    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; promo-notify/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    pub fn key_prefix() -> String {
        "sent_promos_".into()
    }

    pub fn marker() -> String {
        "50%".into()
    }

    pub fn mailgun_api_base() -> String {
        "https://api.mailgun.net/v3".into()
    }
    pub fn mail_from() -> String {
        "promo-notify <noreply@localhost>".into()
    }

    pub fn datastore_api_url() -> String {
        "https://hook.io/datastore".into()
    }

    pub fn providers() -> BTreeMap<String, ProviderConfig> {
        [
            ("mobifone", "http://dichvudidong.vn/tin-khuyen-mai"),
            ("viettel", "http://dichvudidong.vn/tin-khuyen-mai-viettel"),
            ("vinaphone", "http://dichvudidong.vn/tin-khuyen-mai-vinaphone"),
        ]
        .into_iter()
        .map(|(name, url)| (name.to_string(), ProviderConfig::new(url)))
        .collect()
    }
}
