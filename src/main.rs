use anyhow::Context;
use clap::Parser;
use killfeed_relay::{
    ignore, Config, KillboardClient, NotifySink, PollConfig, Relay, StdoutSink, WebhookSink,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "killfeed-relay")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Polls a killboard feed and relays new kills to a webhook", long_about = None)]
struct Cli {
    /// Path to the JSON config file
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Path to a newline-delimited list of solar system IDs to suppress
    #[arg(long)]
    ignore: Option<PathBuf>,

    /// Log notifications locally instead of posting to the webhook
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    info!(
        "starting up: config {} ignore {:?} dry run {}",
        cli.config.display(),
        cli.ignore,
        cli.dry_run
    );

    let config = Config::load(&cli.config)
        .with_context(|| format!("reading config file {}", cli.config.display()))?;
    let ignored = ignore::load_ignore_list(cli.ignore.as_deref());
    let poll_config = PollConfig::default();

    let source = KillboardClient::new(config.feed_url.clone())
        .context("building feed client")?;
    let sink: Box<dyn NotifySink> = if cli.dry_run {
        Box::new(StdoutSink)
    } else {
        Box::new(WebhookSink::new(config.post_url().to_string()).context("building webhook sink")?)
    };

    let mut relay = Relay::new(
        Box::new(source),
        sink,
        config.feed_url.clone(),
        ignored,
        poll_config,
    );
    relay.run().await;

    Ok(())
}
