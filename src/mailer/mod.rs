//! Transactional email: provider client, notification templates and the
//! outbox dispatcher that drains queued emails in the background.

mod client;
mod outbox;
pub mod templates;

pub use client::{HttpMailer, NoopMailer};
pub use outbox::{drain_outbox_once, run_outbox_dispatcher};

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A rendered email ready to hand to the transport.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutboxStatus {
    Pending,
    Sent,
    Failed,
}

impl OutboxStatus {
    pub fn from_db_str(s: &str) -> Self {
        match s {
            "sent" => OutboxStatus::Sent,
            "failed" => OutboxStatus::Failed,
            _ => OutboxStatus::Pending,
        }
    }

    pub fn as_db_str(&self) -> &'static str {
        match self {
            OutboxStatus::Pending => "pending",
            OutboxStatus::Sent => "sent",
            OutboxStatus::Failed => "failed",
        }
    }
}

/// A queued email row from the outbox table.
#[derive(Clone, Debug)]
pub struct OutboxEmail {
    pub id: i64,
    pub recipient: String,
    pub subject: String,
    pub body_html: String,
    pub status: OutboxStatus,
    pub attempts: i64,
    pub last_error: Option<String>,
    pub created_at: i64,
    pub sent_at: Option<i64>,
}

/// Email transport. Returns the provider message id on success.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<String>;
}
