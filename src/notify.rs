use crate::config::NotificationConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::Serialize;

/// Delivers the completion message
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, subject: &str, body: &str) -> Result<()>;
}

/// Writes the message to the log instead of delivering it anywhere
pub struct LogNotifier {
    recipient: String,
}

impl LogNotifier {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
        }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, subject: &str, body: &str) -> Result<()> {
        ::log::info!("Notification to {}: [{}] {}", self.recipient, subject, body);
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// POSTs the message as JSON to a webhook
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
    recipient: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            recipient: recipient.into(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, subject: &str, body: &str) -> Result<()> {
        let payload = WebhookPayload {
            to: &self.recipient,
            subject,
            body,
        };
        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Notification(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Notification(format!(
                "webhook {} returned status {}",
                self.url, status
            )));
        }
        ::log::info!("Notification delivered to webhook {}", self.url);
        Ok(())
    }
}

/// Picks the webhook notifier when a URL is configured, the log otherwise
pub fn from_config(config: &NotificationConfig) -> Box<dyn Notifier> {
    match &config.webhook_url {
        Some(url) => Box::new(WebhookNotifier::new(url, &config.recipient)),
        None => Box::new(LogNotifier::new(&config.recipient)),
    }
}

/// Sends the fixed completion message
pub async fn notify_completion(notifier: &dyn Notifier, config: &NotificationConfig) -> Result<()> {
    notifier.send(&config.subject, &config.body).await
}
