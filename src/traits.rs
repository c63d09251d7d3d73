use crate::types::{KillRecord, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Source of kill records for one poll cycle.
#[async_trait]
pub trait KillSource: Send + Sync {
    /// Fetch every record with a kill time at or after `since`, in the
    /// order the feed serves them (newest first).
    async fn fetch_since(&self, since: DateTime<Utc>) -> Result<Vec<KillRecord>>;
}

/// Destination for a single outbound notification.
///
/// Implementations deliver one payload and report non-success as an error;
/// ordering and pacing are handled above this seam so every sink gets them
/// for free.
#[async_trait]
pub trait NotifySink: Send + Sync {
    async fn notify(&self, text: &str) -> Result<()>;
}
