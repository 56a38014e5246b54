//! # motehubd — motehub daemon
//!
//! Composition root that wires the UDP adapter, the application services
//! and the operator shell together.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise logging
//! - Build the shared server context (mote registry, automation table)
//! - Bind the UDP socket and spawn the receive loop
//! - Spawn the liveness sweeper
//! - Run the operator shell on stdin until `exit`, end of input or Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod shell;

use std::sync::Arc;

use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use motehub_adapter_udp::UdpTransport;
use motehub_app::context::ServerContext;
use motehub_app::services::ingest_service::IngestService;
use motehub_app::services::operator_service::OperatorService;
use motehub_app::sweeper::LivenessSweeper;

use crate::config::Config;
use crate::shell::Listener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::registry()
        .with(EnvFilter::new(&config.logging.filter))
        .with(tracing_subscriber::fmt::Layer::default().compact())
        .init();

    // Shared state
    let ctx = ServerContext::new();

    // Transport
    let transport = UdpTransport::bind(&config.udp).await?;

    // Services
    let ingest = Arc::new(IngestService::new(ctx.clone(), transport.clone()));
    let operator = OperatorService::new(ctx.clone(), transport.clone());

    // Background tasks
    let mut listener = Listener::new(transport.spawn_receiver(ingest));
    let sweeper = LivenessSweeper::new(
        Arc::clone(ctx.registry()),
        config.keep_alive_timeout(),
        config.sweep_interval(),
    )
    .spawn();

    eprintln!(
        "motehubd listening on udp://{}, type 'help' for usage",
        transport.local_addr()?
    );

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    tokio::select! {
        result = shell::run(stdin, &mut stdout, &operator, &mut listener) => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("interrupted"),
    }

    listener.stop();
    sweeper.abort();
    tracing::info!("motehubd stopped");

    Ok(())
}
