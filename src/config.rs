use crate::types::{RelayError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use url::Url;

/// Process configuration, loaded once at startup from a JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the killboard feed; also the base for the kill links
    /// posted to the webhook.
    pub feed_url: String,
    /// Channel the notifications are routed to.
    pub channel: String,
    /// Webhook POST URL from the chat integration configuration.
    pub webhook_url: String,

    /// Webhook URL with the channel selector baked in.
    #[serde(skip)]
    post_url: String,
}

impl Config {
    /// Read and validate the config file. Any failure here is fatal to
    /// startup.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse the webhook URL and set its `channel` query parameter,
    /// replacing one if the integration URL already carries it.
    pub fn validate(&mut self) -> Result<()> {
        if self.feed_url.is_empty() {
            return Err(RelayError::Config("feed_url must not be empty".to_string()));
        }

        let mut url = Url::parse(&self.webhook_url)?;
        let carried: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != "channel")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        url.set_query(None);
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &carried {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("channel", &self.channel);
        }

        self.post_url = url.to_string();
        Ok(())
    }

    /// The webhook URL notifications are POSTed to, channel included.
    /// Only meaningful after `validate`.
    pub fn post_url(&self) -> &str {
        &self.post_url
    }
}
