//! Command-line interface definitions.
//!
//! Flags override values loaded from the optional JSON config file, which in
//! turn override the built-in defaults.

use clap::Parser;
use std::path::PathBuf;

/// Live terminal view of the broadcasters available on a chain.
#[derive(Parser, Debug, Default)]
#[command(
    name = "broadcaster-monitor",
    version,
    about = "Monitor fee broadcasters on the broadcaster discovery network"
)]
pub struct Cli {
    /// Path to a JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Chain ID to monitor (default: 1, Ethereum mainnet)
    #[arg(long)]
    pub chain_id: Option<u64>,

    /// Chain type (default: 0, EVM)
    #[arg(long)]
    pub chain_type: Option<u8>,

    /// Trusted fee signer public key (establishes the fee baseline)
    #[arg(long, conflicts_with = "no_signer")]
    pub signer: Option<String>,

    /// Disable the trusted fee signer (CAUTION: removes fee protections)
    #[arg(long)]
    pub no_signer: bool,

    /// Refresh interval in milliseconds
    #[arg(long)]
    pub refresh: Option<u64>,

    /// Pub-sub topic override
    #[arg(long)]
    pub pubsub_topic: Option<String>,

    /// Base URL of the discovery node bridge
    #[arg(long)]
    pub bridge_url: Option<String>,

    /// Forward discovery client diagnostics into the log pane
    #[arg(long)]
    pub debug: bool,

    /// Append log lines to broadcaster-monitor.log
    #[arg(long)]
    pub log_to_file: bool,
}
