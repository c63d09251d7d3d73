use crate::cache::DedupCache;
use crate::filter::KillFilter;
use crate::sink;
use crate::traits::{KillSource, NotifySink};
use crate::types::PollConfig;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tokio::time::sleep;
use tracing::{error, info};

/// The poll loop: fetch, filter, emit, evict, sleep, repeat.
///
/// Owns the dedup cache for the lifetime of the process. Cycles run
/// strictly one at a time; the only suspension points are the inter-cycle
/// sleep and the blocking network calls, so no locking is needed anywhere.
pub struct Relay {
    source: Box<dyn KillSource>,
    sink: Box<dyn NotifySink>,
    filter: KillFilter,
    cache: DedupCache,
    ignored: HashSet<String>,
    link_base: String,
    config: PollConfig,
    warmed_up: bool,
}

impl Relay {
    pub fn new(
        source: Box<dyn KillSource>,
        sink: Box<dyn NotifySink>,
        link_base: String,
        ignored: HashSet<String>,
        config: PollConfig,
    ) -> Self {
        let filter = KillFilter::new(config.ignore_window, config.value_threshold);
        Self {
            source,
            sink,
            filter,
            cache: DedupCache::new(),
            ignored,
            link_base,
            config,
            warmed_up: false,
        }
    }

    /// Run cycles forever. The first cycle starts immediately; each later
    /// cycle starts one poll interval after the previous one began its
    /// sleep. Runs until the process is terminated.
    pub async fn run(&mut self) {
        loop {
            self.run_cycle(Utc::now()).await;
            sleep(self.config.poll_interval).await;
        }
    }

    /// One full poll cycle at time `now`.
    ///
    /// Fetch and emission failures are logged and contained here; a cycle
    /// never takes the process down. The first cycle after startup is a
    /// warm-up: it runs the filter (priming the cache) but emits nothing,
    /// so a fresh process does not burst notifications for kills that are
    /// merely old news. Eviction runs at the end of every cycle whether or
    /// not anything was emitted. Returns the number of kills handed to the
    /// sink.
    pub async fn run_cycle(&mut self, now: DateTime<Utc>) -> usize {
        let since = now - self.config.fetch_window;
        let records = match self.source.fetch_since(since).await {
            Ok(records) => records,
            Err(e) => {
                error!("error retrieving kills: {}", e);
                Vec::new()
            }
        };

        let retained = self
            .filter
            .apply(records, now, &self.ignored, &mut self.cache);

        let mut emitted = 0;
        if self.warmed_up && !retained.is_empty() {
            emitted = retained.len();
            if let Err(e) = sink::emit_batch(
                self.sink.as_ref(),
                &self.link_base,
                self.config.pacing_delay,
                &retained,
            )
            .await
            {
                error!("error posting kill: {}", e);
            }
        }
        self.warmed_up = true;

        self.cache.evict(now - self.config.ignore_window);
        info!(
            "cycle done: {} posted, {} entries cached",
            emitted,
            self.cache.len()
        );
        emitted
    }

    pub fn cache(&self) -> &DedupCache {
        &self.cache
    }
}
