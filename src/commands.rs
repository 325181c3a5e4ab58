//! Command execution logic.
//!
//! Wires the configuration, the discovery bridge and the terminal view into a
//! [`Monitor`], runs it in the background and waits for Ctrl+C.

use std::io::{self, Write};
use std::sync::Arc;

use crate::bridge::BridgeClient;
use crate::cli::Cli;
use crate::config::AppConfig;
use crate::discovery::BroadcasterDiscovery;
use crate::monitor::Monitor;
use crate::session_log::{SESSION_LOG_FILE, SessionLog};
use crate::ui::TerminalSink;

/// Runs the monitor until the operator interrupts it.
///
/// # Errors
///
/// Returns `Err(String)` if:
/// - The config file is missing or invalid
/// - The resolved configuration fails validation
/// - The HTTP client cannot be built
/// - The Ctrl+C handler cannot be installed
///
/// Discovery failures after startup are never returned; they are shown in the
/// log pane instead.
pub async fn run(cli: Cli) -> Result<(), String> {
    let config = AppConfig::from_cli(&cli)?;
    let bridge = BridgeClient::new(&config.bridge_url)?;

    let session_log = config.file_logging.then(|| {
        let session_log = SessionLog::new(SESSION_LOG_FILE);
        log::info!("Session logging enabled file={}", session_log.path().display());
        session_log
    });

    let monitor = Monitor::new(
        config,
        Arc::new(bridge),
        Box::new(TerminalSink),
        session_log,
    );

    let runner = monitor.clone();
    tokio::spawn(async move {
        runner.start().await;
    });

    tokio::signal::ctrl_c().await.map_err(|e| {
        log::error!("Failed to listen for Ctrl+C: {}", e);
        format!("Failed to listen for Ctrl+C: {e}")
    })?;

    log::info!("Received Ctrl+C, stopping monitor");
    shutdown(&monitor, &mut io::stdout()).await;

    Ok(())
}

/// Stops the monitor, then prints the shutdown notice below its final frame.
async fn shutdown<D: BroadcasterDiscovery>(monitor: &Monitor<D>, out: &mut impl Write) {
    monitor.stop().await;

    if let Err(e) = writeln!(out, "\nMonitor stopped.").and_then(|()| out.flush()) {
        log::warn!("Failed to print shutdown notice: {}", e);
    }
}
