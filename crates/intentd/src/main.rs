//! intentd - Intent-based SDN controller daemon.
//!
//! Entry point: wires logging, configuration, and the event loop. The
//! topology source and switch transport are integration points; without
//! them the daemon runs against an empty static topology and a gateway
//! that traces every instruction.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use intentd::{Controller, ControllerConfig, LoggingGateway, StaticTopology};

#[derive(Debug, Parser)]
#[command(name = "intentd", about = "Intent-based SDN controller")]
struct Args {
    /// Path to a JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tracing filter, e.g. "info" or "intentd=debug".
    #[arg(long, default_value = "info")]
    log_filter: String,
}

fn init_logging(filter: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(filter).context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to set tracing subscriber: {err}"))?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_filter)?;

    let config = ControllerConfig::load_or_default(args.config.as_deref())
        .context("loading configuration")?;
    info!(?config, "starting intentd");

    let topology = Arc::new(StaticTopology::default());
    let gateway = Arc::new(LoggingGateway);
    let controller = Controller::new(topology, gateway);

    let (events, receiver) = mpsc::channel(config.event_queue_depth);
    let loop_handle = tokio::spawn(controller.run(receiver));

    // The event sender is where transport and API bindings plug in; the
    // daemon itself just keeps the loop alive until interrupted.
    tokio::signal::ctrl_c().await.context("waiting for ctrl-c")?;
    info!("shutdown requested");
    drop(events);
    loop_handle.await.context("controller loop panicked")?;

    Ok(())
}
