use crate::traits::NotifySink;
use crate::types::{KillRecord, RelayError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

/// POSTs plain-text notifications to the configured webhook.
pub struct WebhookSink {
    client: Client,
    post_url: String,
}

impl WebhookSink {
    /// `post_url` must already carry the channel query parameter; config
    /// validation bakes it in before this is constructed.
    pub fn new(post_url: String) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self { client, post_url })
    }
}

#[async_trait]
impl NotifySink for WebhookSink {
    async fn notify(&self, text: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.post_url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(text.to_string())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status != reqwest::StatusCode::OK {
            return Err(RelayError::NotifyStatus {
                status: status.as_u16(),
                body,
            });
        }

        debug!("webhook accepted notification: {}", body);
        Ok(())
    }
}

/// Diagnostic sink for dry runs; logs instead of posting.
pub struct StdoutSink;

#[async_trait]
impl NotifySink for StdoutSink {
    async fn notify(&self, text: &str) -> Result<()> {
        info!("dry run, would post: {}", text);
        Ok(())
    }
}

/// Deliver one cycle's worth of filtered kills through a sink.
///
/// The feed serves newest kills first, so the batch is walked in reverse to
/// post oldest-to-newest, keeping the output stream chronological. The
/// pacing delay sits between successive posts only, never before the first
/// or after the last. A failed post aborts the rest of the batch; records
/// already posted stay posted, and the failed remainder is not retried in a
/// later cycle.
pub async fn emit_batch(
    sink: &dyn NotifySink,
    link_base: &str,
    pacing_delay: Duration,
    records: &[KillRecord],
) -> Result<()> {
    let base = link_base.trim_end_matches('/');
    for (i, record) in records.iter().rev().enumerate() {
        if i > 0 {
            sleep(pacing_delay).await;
        }
        let link = format!("{}/kill/{}/", base, record.kill_id);
        info!("new kill: {}", link);
        sink.notify(&link).await?;
    }
    Ok(())
}
