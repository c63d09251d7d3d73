use chrono::{DateTime, Utc};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;

/// Remembers which kills were already seen so they are not posted twice.
///
/// Each poll cycle fetches a window that overlaps the previous one, so the
/// same kill legitimately reappears across consecutive fetches; this cache
/// is what suppresses the repeats. Entries are keyed by kill ID and hold the
/// timestamp of first sight, which drives eviction. In-memory only, lives
/// for the process lifetime.
#[derive(Debug, Default)]
pub struct DedupCache {
    seen: HashMap<String, DateTime<Utc>>,
}

impl DedupCache {
    pub fn new() -> Self {
        Self {
            seen: HashMap::new(),
        }
    }

    /// Check whether `kill_id` was seen before, marking it seen if not.
    ///
    /// Returns true when the ID is already present, leaving the stored
    /// timestamp untouched. Otherwise inserts `kill_id -> now` and returns
    /// false. Check and insert are one operation so a record can never be
    /// counted as both new and duplicate.
    pub fn check(&mut self, kill_id: &str, now: DateTime<Utc>) -> bool {
        match self.seen.entry(kill_id.to_string()) {
            Entry::Occupied(_) => true,
            Entry::Vacant(slot) => {
                slot.insert(now);
                false
            }
        }
    }

    /// Drop every entry first seen strictly before `before`.
    ///
    /// Entries with a timestamp equal to `before` are retained. Returns the
    /// number of entries removed.
    pub fn evict(&mut self, before: DateTime<Utc>) -> usize {
        let len_before = self.seen.len();
        self.seen.retain(|_, first_seen| *first_seen >= before);
        let dropped = len_before - self.seen.len();
        if dropped > 0 {
            debug!("evicted {} entries from dedup cache", dropped);
        }
        dropped
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
