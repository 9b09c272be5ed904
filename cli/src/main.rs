//! Client registry CLI server
//!
//! Headless REST service suitable for deployment as a systemd service,
//! Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/client-registry/config.toml)
//! client-service
//!
//! # Custom config path
//! client-service --config /etc/client-registry/config.toml
//!
//! # Override the port and load sample clients
//! client-service --api-port 9090 --seed
//!
//! # Validate config without starting
//! client-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use client_registry::config::{AppConfig, StorageBackend};
use client_registry::server::{init_tracing, ServerHandle, ServerOptions};

/// Client registry: REST API for client records.
#[derive(Parser, Debug)]
#[command(
    name = "client-service",
    version,
    about = "REST service for registering and querying clients",
    long_about = "Client registry REST API server backed by SQLite or an in-memory store.\n\n\
                  Default config: ~/.config/client-registry/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "CLIENTS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Insert sample clients when the store is empty.
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(client_registry::default_config_path);

    let loaded = AppConfig::load(&config_path);
    let mut config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => AppConfig::default(),
    };

    // Applied before tracing starts so --log-level takes effect
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    match loaded {
        Ok(_) => info!("Configuration loaded from {}", config_path.display()),
        Err(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.api_port {
        info!("CLI override: api_port = {}", port);
        config.server.api_port = port;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        let store = match config.database.backend {
            StorageBackend::Sqlite => config.database.connection_url(),
            StorageBackend::Memory => "in-memory".to_string(),
        };
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.api_address());
        println!("   Store       : {}", store);
        println!("   Log level   : {}", config.logging.level);
        println!("   Page size   : {}", config.pagination.default_page_size);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        seed_sample_data: cli.seed,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
