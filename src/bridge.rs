//! HTTP bridge to a broadcaster discovery node.
//!
//! The discovery node runs the peer-to-peer client and exposes it over a small
//! JSON API. [`BridgeClient`] implements [`BroadcasterDiscovery`] on top of it:
//!
//! - `POST /start` with the chain and options, answers `{ "status": ... }`
//! - `POST /stop`
//! - `GET /broadcasters?chainType=&chainId=&useRelayAdapt=`, answers
//!   `{ "broadcasters": [...], "meshPeerCount": n, "status": ... }`
//!
//! Status values returned by the node are forwarded to the status callback
//! registered on start whenever they change.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::config::Chain;
use crate::discovery::{
    BroadcasterDebugger, BroadcasterDiscovery, BroadcasterOptions, BroadcasterRecord,
    DiscoveryError, StatusCallback,
};

/// Per-request timeout. The monitor itself never times out a call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StartRequest<'a> {
    chain: Chain,
    options: &'a BroadcasterOptions,
}

#[derive(Deserialize)]
struct StartResponse {
    status: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BroadcastersResponse {
    broadcasters: Vec<BroadcasterRecord>,
    mesh_peer_count: Option<u64>,
    status: Option<String>,
}

/// State shared with the status callback and the sync peer-count getter.
#[derive(Default)]
struct Session {
    chain: Option<Chain>,
    on_status_change: Option<StatusCallback>,
    debugger: Option<Arc<dyn BroadcasterDebugger>>,
    last_status: Option<String>,
    mesh_peer_count: Option<u64>,
}

/// Discovery client backed by a discovery node's HTTP API.
pub struct BridgeClient {
    client: reqwest::Client,
    base_url: String,
    session: Mutex<Session>,
}

impl BridgeClient {
    /// Creates a client for the node at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session: Mutex::new(Session::default()),
        })
    }

    fn session(&self) -> std::sync::MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn debug_log(&self, message: &str) {
        let debugger = self.session().debugger.clone();
        if let Some(debugger) = debugger {
            debugger.log(message);
        }
    }

    fn debug_error(&self, message: &str) {
        let debugger = self.session().debugger.clone();
        if let Some(debugger) = debugger {
            debugger.error(message);
        }
    }

    /// Forwards `status` to the callback if it differs from the last one seen.
    /// The callback runs without the session lock held.
    fn publish_status(&self, status: String) {
        let notify = {
            let mut session = self.session();
            if session.last_status.as_deref() == Some(status.as_str()) {
                None
            } else {
                session.last_status = Some(status.clone());
                session.chain.zip(session.on_status_change.clone())
            }
        };

        if let Some((chain, callback)) = notify {
            callback(chain, status);
        }
    }
}

#[async_trait]
impl BroadcasterDiscovery for BridgeClient {
    async fn start(
        &self,
        chain: Chain,
        options: BroadcasterOptions,
        on_status_change: StatusCallback,
        debugger: Option<Arc<dyn BroadcasterDebugger>>,
    ) -> Result<(), DiscoveryError> {
        {
            let mut session = self.session();
            *session = Session {
                chain: Some(chain),
                on_status_change: Some(on_status_change),
                debugger,
                ..Session::default()
            };
        }

        let url = format!("{}/start", self.base_url);
        log::debug!("Starting discovery client chain_id={} url={}", chain.id, url);
        self.debug_log(&format!("POST {url}"));

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .json(&StartRequest {
                chain,
                options: &options,
            })
            .send()
            .await
            .map_err(|e| {
                log::error!("Bridge start request failed chain_id={}: {}", chain.id, e);
                self.debug_error(&e.to_string());
                format!("HTTP request failed: {e}")
            })?;

        log::debug!(
            "Bridge start responded chain_id={} duration_ms={} status={:?}",
            chain.id,
            start.elapsed().as_millis(),
            response.status()
        );

        let response = response.error_for_status().map_err(|e| {
            log::error!("Bridge rejected start chain_id={}: {}", chain.id, e);
            format!("Bridge rejected start: {e}")
        })?;

        let body: StartResponse = response.json().await.map_err(|e| {
            log::error!("Failed to parse start response chain_id={}: {}", chain.id, e);
            format!("Failed to parse response: {e}")
        })?;

        if let Some(status) = body.status {
            self.publish_status(status);
        }

        Ok(())
    }

    async fn stop(&self) -> Result<(), DiscoveryError> {
        let url = format!("{}/stop", self.base_url);
        log::debug!("Stopping discovery client url={}", url);

        let result = self
            .client
            .post(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map(|_| ())
            .map_err(|e| format!("HTTP request failed: {e}"));

        *self.session() = Session::default();
        result
    }

    async fn find_all_broadcasters_for_chain(
        &self,
        chain: Chain,
        use_relay_adapt: bool,
    ) -> Result<Vec<BroadcasterRecord>, DiscoveryError> {
        let url = format!("{}/broadcasters", self.base_url);
        log::debug!(
            "Fetching broadcasters chain_id={} use_relay_adapt={}",
            chain.id,
            use_relay_adapt
        );

        let start = Instant::now();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("chainType", chain.chain_type.to_string()),
                ("chainId", chain.id.to_string()),
                ("useRelayAdapt", use_relay_adapt.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                log::error!("Broadcaster query failed chain_id={}: {}", chain.id, e);
                self.debug_error(&e.to_string());
                format!("HTTP request failed: {e}")
            })?;

        log::debug!(
            "Broadcaster query responded chain_id={} duration_ms={} status={:?}",
            chain.id,
            start.elapsed().as_millis(),
            response.status()
        );

        let response = response
            .error_for_status()
            .map_err(|e| format!("Bridge returned an error: {e}"))?;

        let body: BroadcastersResponse = response.json().await.map_err(|e| {
            log::error!("Failed to parse broadcasters response chain_id={}: {}", chain.id, e);
            format!("Failed to parse response: {e}")
        })?;

        if let Some(count) = body.mesh_peer_count {
            self.session().mesh_peer_count = Some(count);
        }
        if let Some(status) = body.status {
            self.publish_status(status);
        }

        self.debug_log(&format!("Found {} broadcasters", body.broadcasters.len()));
        log::info!(
            "Fetched broadcasters chain_id={} count={}",
            chain.id,
            body.broadcasters.len()
        );

        Ok(body.broadcasters)
    }

    fn get_mesh_peer_count(&self) -> Result<u64, DiscoveryError> {
        self.session()
            .mesh_peer_count
            .ok_or_else(|| "Mesh peer count not reported yet".to_string())
    }
}
