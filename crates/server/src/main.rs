// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! kbd - The kanban board server.
//!
//! Serves the board API over HTTP from a SQLite database in the data
//! directory. Only one kbd may serve a given data directory at a time.
//!
//! Usage:
//!   kbd [--config <file>] [--bind <addr>] [--data <dir>] [--verbose]

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kb_server::lock::acquire_lock;
use kb_server::{router, AppState, Config};

/// kbd: kanban board server
#[derive(Parser, Debug)]
#[command(name = "kbd")]
#[command(about = "HTTP server for kanban boards with consistent column and task ordering")]
struct Args {
    /// Configuration file (default: $XDG_CONFIG_HOME/kanban/kbd.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind the server to
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Directory for the database and lock file
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Times a conflicting transaction is re-run before reporting 409
    #[arg(long)]
    max_retries: Option<u32>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let mut config = Config::resolve(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(data) = args.data {
        config.data_dir = data;
    }
    if let Some(max_retries) = args.max_retries {
        config.max_retries = max_retries;
    }

    info!("Starting kbd");
    info!("  Bind address: {}", config.bind);
    info!("  Data directory: {}", config.data_dir.display());

    std::fs::create_dir_all(&config.data_dir)?;
    let _lock = acquire_lock(&config.lock_path())?;
    let state = AppState::open(&config)?;

    let listener = TcpListener::bind(config.bind).await?;
    info!("Listening on: {}", config.bind);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("kbd stopped");
    Ok(())
}
