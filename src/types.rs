use chrono::{DateTime, Utc};
use std::time::Duration;

/// One kill record observed on the feed.
///
/// A record is only constructed when both the identifier and the kill time
/// were extracted successfully; every other field degrades to a default
/// instead of failing the record.
#[derive(Debug, Clone, PartialEq)]
pub struct KillRecord {
    pub kill_id: String,
    pub kill_time: DateTime<Utc>,
    /// Solar system the kill happened in. Records without one are never
    /// matched by the ignore list.
    pub system_id: Option<String>,
    /// Estimated value of the kill, 0.0 when the feed did not provide one.
    pub value: f64,
}

/// Timing and threshold knobs for the poll loop.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Sleep between cycle starts; the first cycle runs immediately.
    pub poll_interval: Duration,
    /// Trailing window requested from the feed each cycle.
    pub fetch_window: chrono::Duration,
    /// Records older than this are stale; also the cache eviction horizon.
    /// Must be longer than `fetch_window` so consecutive fetches overlap.
    pub ignore_window: chrono::Duration,
    /// Delay between successive notifications within one cycle.
    pub pacing_delay: Duration,
    /// Kills at or above this value are posted even from ignored systems.
    pub value_threshold: f64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5 * 60),
            fetch_window: chrono::Duration::hours(1),
            ignore_window: chrono::Duration::hours(2),
            pacing_delay: Duration::from_millis(500),
            value_threshold: 1_000_000_000.0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed returned status {status}: {body}")]
    FeedStatus { status: u16, body: String },

    #[error("decode error: {0}")]
    Decode(String),

    #[error("webhook returned status {status}: {body}")]
    NotifyStatus { status: u16, body: String },

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RelayError>;
