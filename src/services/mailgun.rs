// src/services/mailgun.rs

//! Mail delivery.

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::MailgunConfig;
use crate::utils::http::read_body;

/// Outbound notification channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send one message to every recipient.
    async fn send(&self, subject: &str, body: &str, recipients: &[String]) -> Result<()>;
}

/// Sends plain-text mail through the Mailgun messages API.
pub struct MailgunNotifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl MailgunNotifier {
    /// Create a notifier for `config.domain`.
    pub fn new(
        client: reqwest::Client,
        config: &MailgunConfig,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if config.domain.trim().is_empty() {
            return Err(AppError::config("Mailgun domain is not set"));
        }
        if api_key.trim().is_empty() {
            return Err(AppError::config("Mailgun API key is not set"));
        }

        Ok(Self {
            client,
            endpoint: format!(
                "{}/{}/messages",
                config.api_base.trim_end_matches('/'),
                config.domain.trim()
            ),
            api_key,
            from: config.from.clone(),
        })
    }
}

#[async_trait]
impl Notifier for MailgunNotifier {
    async fn send(&self, subject: &str, body: &str, recipients: &[String]) -> Result<()> {
        if recipients.is_empty() {
            return Ok(());
        }

        let mut form: Vec<(&str, &str)> = vec![("from", self.from.as_str())];
        form.extend(recipients.iter().map(|to| ("to", to.as_str())));
        form.push(("subject", subject));
        form.push(("text", body));

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth("api", Some(&self.api_key))
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::mail(e.to_string()))?;

        let reply = read_body(response, AppError::Mail).await?;
        log::debug!("Mailgun accepted message: {}", reply.trim());
        Ok(())
    }
}
