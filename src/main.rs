//! Broadcaster Monitor
//!
//! A terminal monitor for the fee broadcasters advertising on a chain.
//!
//! # Features
//!
//! - **Live view**: status, mesh peers, trusted signer and a broadcaster table,
//!   redrawn in place on every scan
//! - **Log pane**: the last eight events, colour-coded by severity
//! - **Session log**: optional append-only copy of the log pane on disk
//!
//! # Usage
//!
//! ```bash
//! # Monitor Ethereum mainnet every 30 seconds
//! broadcaster-monitor
//!
//! # Polygon, refreshing every 10 seconds, with a config file
//! broadcaster-monitor --config monitor.json --chain-id 137 --refresh 10000
//!
//! # Without a trusted fee signer (no fee protection)
//! broadcaster-monitor --no-signer
//! ```

mod bridge;
mod cli;
mod commands;
mod config;
mod discovery;
mod history;
mod monitor;
mod session_log;
mod tokens;
mod ui;
mod utils;

use clap::Parser;
use cli::Cli;

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    log::info!("Application started version={}", env!("CARGO_PKG_VERSION"));
    let cli = Cli::parse();

    if let Err(e) = commands::run(cli).await {
        log::error!("Application error: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    std::process::exit(0);
}
