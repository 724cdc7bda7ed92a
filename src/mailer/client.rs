//! HTTP client for the transactional email provider.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::{EmailMessage, Mailer};

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

#[derive(Deserialize)]
struct SendResponse {
    id: String,
}

/// Sends email through an HTTP transactional-email provider.
pub struct HttpMailer {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    /// # Arguments
    /// * `base_url` - Base URL of the provider API (e.g., "https://api.resend.com")
    /// * `api_key` - Bearer key for the provider
    /// * `from` - Sender address, e.g. "Recursive Recordings <demos@recursive.example>"
    pub fn new(base_url: String, api_key: String, from: String, timeout_sec: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()
            .expect("Failed to create HTTP client");

        let base_url = base_url.trim_end_matches('/').to_string();

        Self {
            client,
            base_url,
            api_key,
            from,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<String> {
        let url = format!("{}/emails", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&SendRequest {
                from: &self.from,
                to: &message.to,
                subject: &message.subject,
                html: &message.html,
            })
            .send()
            .await
            .context("Failed to connect to email provider")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Email provider rejected message to {}: status {}",
                message.to,
                response.status()
            );
        }

        let body: SendResponse = response
            .json()
            .await
            .context("Failed to parse email provider response")?;
        debug!("Message sent: {}", body.id);
        Ok(body.id)
    }
}

/// Transport that drops messages on the floor. Used when no provider is
/// configured and in tests.
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, message: &EmailMessage) -> Result<String> {
        info!("Email transport not configured, dropping message to {}", message.to);
        Ok("noop".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_removed_from_base_url() {
        let mailer = HttpMailer::new(
            "https://api.mailer.example/".to_string(),
            "key".to_string(),
            "Recursive Recordings <demos@recursive.example>".to_string(),
            30,
        );
        assert_eq!(mailer.base_url(), "https://api.mailer.example");
    }
}
