//! pastebin Server Binary
//!
//! Starts the TCP server for the pastebin service.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use pastebin::network::Server;
use pastebin::{BlobStore, Config, Service};
use tracing_subscriber::{fmt, EnvFilter};

/// pastebin Server
#[derive(Parser, Debug)]
#[command(name = "pastebin-server")]
#[command(about = "Ephemeral text-sharing service")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, env = "PASTEBIN_BIND", default_value = "127.0.0.1:8000")]
    listen: String,

    /// Seconds a paste stays available
    #[arg(short, long, env = "PASTEBIN_EXPIRY", default_value = "300")]
    expiry: u64,

    /// Seconds between sweeps of expired pastes (defaults to the expiry)
    #[arg(long, env = "PASTEBIN_SWEEP_INTERVAL")]
    sweep_interval: Option<u64>,

    /// Length of generated paste ids
    #[arg(long, env = "PASTEBIN_ID_LENGTH", default_value = "8")]
    id_length: usize,

    /// Maximum paste size in KB
    #[arg(long, env = "PASTEBIN_MAX_SIZE_KB", default_value = "4096")]
    max_size_kb: usize,

    /// Maximum concurrent connections
    #[arg(short, long, env = "PASTEBIN_MAX_CONNECTIONS", default_value = "1024")]
    max_connections: usize,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pastebin=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("pastebin Server v{}", pastebin::VERSION);
    tracing::info!("Listen address: {}", args.listen);

    let config = Config::builder()
        .listen_addr(&args.listen)
        .ttl(Duration::from_secs(args.expiry))
        .sweep_interval(Duration::from_secs(args.sweep_interval.unwrap_or(args.expiry)))
        .id_length(args.id_length)
        .max_payload_kb(args.max_size_kb)
        .max_connections(args.max_connections)
        .build();

    // Fails fast on a zero expiry, an oversized limit or similar misconfiguration
    let store = match BlobStore::open(config.clone()) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            std::process::exit(1);
        }
    };

    let mut server = Server::new(config, Service::new(Arc::clone(&store)));
    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        store.shutdown();
        std::process::exit(1);
    }

    store.shutdown();
    tracing::info!("Server stopped");
}
