use crate::cache::DedupCache;
use crate::types::KillRecord;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::debug;

/// Per-record filter applied between decode and emission.
///
/// Stages run in a fixed order and short-circuit on the first exclusion:
/// recency window, ignore list (with the high-value override), then the
/// dedup cache. Survivors keep their fetch-order position so the sink can
/// reverse them into chronological order.
#[derive(Debug, Clone)]
pub struct KillFilter {
    ignore_window: chrono::Duration,
    value_threshold: f64,
}

impl KillFilter {
    pub fn new(ignore_window: chrono::Duration, value_threshold: f64) -> Self {
        Self {
            ignore_window,
            value_threshold,
        }
    }

    /// Run the filter stages over one fetched batch.
    ///
    /// Every record that reaches the dedup stage is marked seen in the
    /// cache, including records the caller will not emit (the warm-up cycle
    /// relies on this to prime the cache without posting).
    pub fn apply(
        &self,
        records: Vec<KillRecord>,
        now: DateTime<Utc>,
        ignored: &HashSet<String>,
        cache: &mut DedupCache,
    ) -> Vec<KillRecord> {
        let stale_before = now - self.ignore_window;
        let mut retained = Vec::new();

        for record in records {
            if record.kill_time < stale_before {
                debug!(
                    "ignoring stale kill {}: kill time {} now {}",
                    record.kill_id, record.kill_time, now
                );
                continue;
            }

            if let Some(system_id) = &record.system_id {
                // Kills at or above the value threshold surface even from
                // ignored systems.
                if ignored.contains(system_id) && record.value < self.value_threshold {
                    debug!(
                        "ignored system, skipping kill {} in system {}",
                        record.kill_id, system_id
                    );
                    continue;
                }
            }

            if cache.check(&record.kill_id, now) {
                debug!("already seen kill {}", record.kill_id);
                continue;
            }

            debug!(
                "retaining kill {} system {:?} value {}",
                record.kill_id, record.system_id, record.value
            );
            retained.push(record);
        }

        retained
    }
}
