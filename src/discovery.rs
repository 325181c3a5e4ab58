//! Port to the broadcaster discovery client.
//!
//! The monitor never talks to the peer-to-peer network directly. It drives a
//! [`BroadcasterDiscovery`] implementation, which owns transport, peer scoring
//! and trusted-signer fee checks. The binary uses [`crate::bridge::BridgeClient`];
//! tests use an in-memory fake.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::Chain;

/// Errors reported by a discovery client.
pub type DiscoveryError = String;

/// Fee quote published by a broadcaster for one token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenFee {
    /// Fee per unit of gas as an integer string (decimal or `0x` hex).
    pub fee_per_unit_gas: String,
    /// Quote expiry, unix milliseconds.
    pub expiration: u64,
    /// Reliability score in `[0, 1]`.
    pub reliability: f64,
    pub available_wallets: u64,
    pub relay_adapt: String,
}

/// A broadcaster currently advertising fees on a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcasterRecord {
    /// Shielded broadcaster address. Not a chain address.
    pub railgun_address: String,
    pub token_address: String,
    pub token_fee: TokenFee,
}

/// Options passed to the discovery client on start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcasterOptions {
    /// `None` disables trusted-signer fee protection.
    pub trusted_fee_signer: Option<String>,
    pub use_dns_discovery: bool,
    pub pub_sub_topic: String,
}

/// Invoked by the discovery client whenever its connection status changes.
/// May fire at any time, from any task.
pub type StatusCallback = Arc<dyn Fn(Chain, String) + Send + Sync>;

/// Receives diagnostics from the discovery client when debugging is enabled.
pub trait BroadcasterDebugger: Send + Sync {
    fn log(&self, message: &str);
    fn error(&self, message: &str);
}

/// The operations the monitor needs from a discovery client.
#[async_trait]
pub trait BroadcasterDiscovery: Send + Sync + 'static {
    /// Connects to the discovery network for `chain`.
    async fn start(
        &self,
        chain: Chain,
        options: BroadcasterOptions,
        on_status_change: StatusCallback,
        debugger: Option<Arc<dyn BroadcasterDebugger>>,
    ) -> Result<(), DiscoveryError>;

    /// Releases network resources.
    async fn stop(&self) -> Result<(), DiscoveryError>;

    /// Returns every broadcaster currently known for `chain`.
    async fn find_all_broadcasters_for_chain(
        &self,
        chain: Chain,
        use_relay_adapt: bool,
    ) -> Result<Vec<BroadcasterRecord>, DiscoveryError>;

    /// Number of peers in the pub-sub mesh.
    fn get_mesh_peer_count(&self) -> Result<u64, DiscoveryError>;
}
