//! Outbox dispatcher: drains queued notification emails in the background so
//! delivery failures never surface as request failures. Rows that keep
//! failing are parked as failed once the attempt cap is reached.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{error, info};

use crate::label_store::LabelStore;

use super::{EmailMessage, Mailer};

const DISPATCH_BATCH_SIZE: usize = 20;

/// Send every currently-pending outbox row once. Returns the number of
/// emails delivered in this pass.
pub async fn drain_outbox_once(
    store: &dyn LabelStore,
    mailer: &dyn Mailer,
    max_attempts: u32,
) -> Result<usize> {
    let pending = store.pending_emails(DISPATCH_BATCH_SIZE)?;
    let mut sent = 0;

    for entry in pending {
        let message = EmailMessage {
            to: entry.recipient.clone(),
            subject: entry.subject.clone(),
            html: entry.body_html.clone(),
        };
        match mailer.send(&message).await {
            Ok(provider_id) => {
                store.mark_email_sent(entry.id)?;
                info!(
                    "Delivered queued email {} to {} (provider id {})",
                    entry.id, entry.recipient, provider_id
                );
                sent += 1;
            }
            Err(err) => {
                error!(
                    "Failed to deliver queued email {} to {}: {}",
                    entry.id, entry.recipient, err
                );
                store.mark_email_failed(entry.id, &format!("{}", err), max_attempts)?;
            }
        }
    }

    Ok(sent)
}

/// Background loop driving [`drain_outbox_once`] on a fixed interval.
/// Spawned from `main`; runs for the lifetime of the process.
pub async fn run_outbox_dispatcher(
    store: Arc<dyn LabelStore>,
    mailer: Arc<dyn Mailer>,
    poll_interval: Duration,
    max_attempts: u32,
) {
    let mut ticker = tokio::time::interval(poll_interval);

    // Skip the first immediate tick, wait for the first interval
    ticker.tick().await;

    loop {
        ticker.tick().await;

        if let Err(err) = drain_outbox_once(store.as_ref(), mailer.as_ref(), max_attempts).await {
            error!("Outbox dispatch pass failed: {}", err);
        }
    }
}
