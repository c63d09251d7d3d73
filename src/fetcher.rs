use crate::decoder;
use crate::traits::KillSource;
use crate::types::{KillRecord, RelayError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::{debug, info};

/// Timestamp format the feed expects in the `startTime` path segment.
const START_TIME_FORMAT: &str = "%Y%m%d%H%M";

const USER_AGENT: &str = concat!("killfeed-relay/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the killboard feed.
///
/// One GET per poll cycle against `{base}/startTime/{ts}/`. There is no
/// retry and no timeout beyond transport defaults; reliability comes from
/// the overlapping fetch window, not from re-requesting.
pub struct KillboardClient {
    client: Client,
    base_url: String,
}

impl KillboardClient {
    pub fn new(base_url: String) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn window_url(&self, since: DateTime<Utc>) -> String {
        format!(
            "{}/startTime/{}/",
            self.base_url,
            since.format(START_TIME_FORMAT)
        )
    }
}

#[async_trait]
impl KillSource for KillboardClient {
    async fn fetch_since(&self, since: DateTime<Utc>) -> Result<Vec<KillRecord>> {
        let url = self.window_url(since);
        debug!("retrieving {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::FeedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let records = decoder::decode_batch(&body)?;
        info!("fetched {} kills from feed", records.len());
        Ok(records)
    }
}
