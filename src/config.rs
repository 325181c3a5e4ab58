//! Monitor configuration.
//!
//! Built once at startup from defaults, an optional JSON config file and the
//! command line, validated, and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::cli::Cli;

pub const DEFAULT_CHAIN_ID: u64 = 1;
pub const DEFAULT_CHAIN_TYPE: u8 = 0;
pub const DEFAULT_REFRESH_MS: u64 = 30_000;
pub const DEFAULT_PUBSUB_TOPIC: &str = "/waku/2/rs/1/1";
pub const DEFAULT_BRIDGE_URL: &str = "http://127.0.0.1:8547";
pub const DEFAULT_SIGNER: &str = "0zk1qyzgh9ctuxm6d06gmax39xutjgrawdsljtv80lqnjtqp3exxayuf0rv7j6fe3z53laetcl9u3cma0q9k4npgy8c8ga4h6mx83v09m8ewctsekw4a079dcl5sw4k";

/// A chain as identified on the discovery network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chain {
    #[serde(rename = "type")]
    pub chain_type: u8,
    pub id: u64,
}

/// Immutable monitor configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub chain: Chain,
    /// `None` means fee protection is disabled.
    pub trusted_fee_signer: Option<String>,
    pub refresh_interval_ms: u64,
    pub pubsub_topic: Option<String>,
    pub bridge_url: String,
    pub debug: bool,
    pub file_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chain: Chain {
                chain_type: DEFAULT_CHAIN_TYPE,
                id: DEFAULT_CHAIN_ID,
            },
            trusted_fee_signer: Some(DEFAULT_SIGNER.to_string()),
            refresh_interval_ms: DEFAULT_REFRESH_MS,
            pubsub_topic: None,
            bridge_url: DEFAULT_BRIDGE_URL.to_string(),
            debug: false,
            file_logging: false,
        }
    }
}

/// Shape of the JSON config file. Every field is optional.
///
/// `trustedFeeSigner: null` disables fee protection, an absent key keeps the
/// default signer.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    pub chain_id: Option<u64>,
    pub chain_type: Option<u8>,
    #[serde(default, deserialize_with = "deserialize_signer")]
    pub trusted_fee_signer: Option<Option<String>>,
    pub refresh_interval: Option<u64>,
    pub pub_sub_topic: Option<String>,
    pub bridge_url: Option<String>,
    pub debug: Option<bool>,
    pub file_logging: Option<bool>,
}

fn deserialize_signer<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl FileConfig {
    /// Reads and parses a JSON config file.
    pub fn load(path: &Path) -> Result<Self, String> {
        log::info!("Loading config file={}", path.display());

        if !path.exists() {
            return Err(format!("Config file not found: {}", path.display()));
        }

        let data = fs::read_to_string(path).map_err(|e| {
            log::error!("Failed to read config file={}: {}", path.display(), e);
            format!("Error reading config file: {e}")
        })?;

        serde_json::from_str(&data).map_err(|e| {
            log::error!("Failed to parse config file={}: {}", path.display(), e);
            format!("Error parsing config file: {e}")
        })
    }
}

impl AppConfig {
    /// Builds the configuration from the command line, loading the config
    /// file it points to, and validates the result.
    pub fn from_cli(cli: &Cli) -> Result<Self, String> {
        let file = match &cli.config {
            Some(path) => Some(FileConfig::load(path)?),
            None => None,
        };

        let config = Self::resolve(cli, file);
        config.validate()?;

        log::debug!(
            "Resolved config chain_id={} chain_type={} refresh_ms={} signer_enabled={}",
            config.chain.id,
            config.chain.chain_type,
            config.refresh_interval_ms,
            config.trusted_fee_signer.is_some()
        );

        Ok(config)
    }

    /// Layers defaults, the file config and the command line.
    fn resolve(cli: &Cli, file: Option<FileConfig>) -> Self {
        let mut config = Self::default();

        if let Some(file) = file {
            if let Some(id) = file.chain_id {
                config.chain.id = id;
            }
            if let Some(chain_type) = file.chain_type {
                config.chain.chain_type = chain_type;
            }
            if let Some(signer) = file.trusted_fee_signer {
                config.trusted_fee_signer = signer;
            }
            if let Some(refresh) = file.refresh_interval {
                config.refresh_interval_ms = refresh;
            }
            if file.pub_sub_topic.is_some() {
                config.pubsub_topic = file.pub_sub_topic;
            }
            if let Some(url) = file.bridge_url {
                config.bridge_url = url;
            }
            config.debug = file.debug.unwrap_or(config.debug);
            config.file_logging = file.file_logging.unwrap_or(config.file_logging);
        }

        if let Some(id) = cli.chain_id {
            config.chain.id = id;
        }
        if let Some(chain_type) = cli.chain_type {
            config.chain.chain_type = chain_type;
        }
        if let Some(signer) = &cli.signer {
            config.trusted_fee_signer = Some(signer.clone());
        } else if cli.no_signer {
            config.trusted_fee_signer = None;
        }
        if let Some(refresh) = cli.refresh {
            config.refresh_interval_ms = refresh;
        }
        if let Some(topic) = &cli.pubsub_topic {
            config.pubsub_topic = Some(topic.clone());
        }
        if let Some(url) = &cli.bridge_url {
            config.bridge_url = url.clone();
        }
        config.debug |= cli.debug;
        config.file_logging |= cli.log_to_file;

        config
    }

    fn validate(&self) -> Result<(), String> {
        if self.refresh_interval_ms == 0 {
            return Err("Refresh interval must be greater than 0 ms".to_string());
        }
        if matches!(&self.trusted_fee_signer, Some(signer) if signer.trim().is_empty()) {
            return Err(
                "Trusted fee signer must not be empty; use --no-signer to disable it".to_string(),
            );
        }
        if self.bridge_url.trim().is_empty() {
            return Err("Bridge URL must not be empty".to_string());
        }
        Ok(())
    }

    /// Pub-sub topic handed to the discovery client.
    pub fn pubsub_topic(&self) -> &str {
        self.pubsub_topic.as_deref().unwrap_or(DEFAULT_PUBSUB_TOPIC)
    }
}
