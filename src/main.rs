mod call;
mod cli;
mod config;
mod engine;
mod error;
mod notify;
mod store;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use call::{CallKind, PendingCall};
use cli::{Cli, Command};
use config::BlastConfig;
use engine::{Sweeper, ThreadRandom};
use notify::WebhookClient;
use store::{MemoryOutcomes, MemoryStore};

type DemoSweeper = Sweeper<MemoryStore, MemoryOutcomes, WebhookClient, ThreadRandom>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = BlastConfig::load()?;
    if let Some(secs) = cli.interval {
        config.interval_secs = secs;
        config.validate()?;
    }

    match cli.command {
        Command::Run { calls, notify_url } => {
            let sweeper = build_sweeper(&config, calls, &notify_url).await;
            tracing::info!(
                interval_secs = config.interval_secs,
                calls,
                notify_url = %notify_url,
                "starting resolution sweep loop"
            );
            sweeper.run(config.interval()).await;
        }
        Command::Sweep { calls, notify_url } => {
            let sweeper = build_sweeper(&config, calls, &notify_url).await;
            let progress = ui::SweepProgress::start(calls);
            let report = sweeper.sweep_once().await?;
            progress.complete(&report);
        }
        Command::Status => ui::print_status(&config),
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "blastsim=debug"
    } else {
        "blastsim=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Seed an in-memory store with demo calls and wire up the sweeper. The
/// production deployment would hand the sweeper a store backed by the real
/// call collections instead.
async fn build_sweeper(config: &BlastConfig, calls: u32, notify_url: &str) -> DemoSweeper {
    let store = MemoryStore::new();
    for i in 0..calls {
        let kind = if i % 2 == 0 {
            CallKind::Voice
        } else {
            CallKind::Tts
        };
        let mut call = PendingCall::new(
            kind,
            format!("+55119000{i:05}"),
            notify_url.to_string(),
            "POST".into(),
        );
        call.blaster_type = format!("demo-{kind}");
        call.press_election = "1".into();
        call.auxiliary_field = format!("batch-{}", i / 10);
        call.test_mode = true;
        store.insert(call).await;
    }

    Sweeper::new(
        store,
        MemoryOutcomes::new(config.outcomes.clone()),
        WebhookClient::new(config.request_timeout()),
        ThreadRandom,
    )
}
