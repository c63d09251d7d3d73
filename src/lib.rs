pub mod cache;
pub mod config;
pub mod decoder;
pub mod fetcher;
pub mod filter;
pub mod ignore;
pub mod relay;
pub mod sink;
pub mod traits;
pub mod types;

pub use cache::DedupCache;
pub use config::Config;
pub use fetcher::KillboardClient;
pub use filter::KillFilter;
pub use relay::Relay;
pub use sink::{StdoutSink, WebhookSink};
pub use traits::{KillSource, NotifySink};
pub use types::{KillRecord, PollConfig, RelayError, Result};
