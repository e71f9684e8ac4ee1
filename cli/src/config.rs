//! Client configuration with TOML file support.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use ballot_gateway::GatewayConfig;
use ballot_sync::{ConflictPolicy, FailurePolicy, SyncConfig};
use ballot_types::{ContractId, KnownContract, NetworkId, Principal};
use ballot_utils::LogFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Configuration for the ballot client.
///
/// Can be loaded from a TOML file via [`ClientConfig::from_toml_file`];
/// command-line flags and `BALLOT_*` variables override file values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_network")]
    pub network: NetworkId,

    /// Node API base URL. Falls back to the network's public API.
    #[serde(default)]
    pub api_url: Option<String>,

    /// The voting contract, as `ADDRESS.NAME`.
    #[serde(default = "default_contract")]
    pub contract: ContractId,

    /// Caller for read-only queries. Defaults to the contract address.
    #[serde(default)]
    pub sender: Option<Principal>,

    /// Wallet service endpoint for sign-in and transaction signing.
    #[serde(default = "default_wallet_url")]
    pub wallet_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Proposal fetches in flight at once; 1 fetches in sequence.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    #[serde(default)]
    pub failure_policy: FailurePolicy,

    #[serde(default)]
    pub retries: u32,

    #[serde(default)]
    pub conflict_policy: ConflictPolicy,

    /// Seconds between refreshes in `watch`.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// The rest of the deployment, by name.
    #[serde(default = "default_contracts")]
    pub contracts: BTreeMap<String, ContractId>,
}

fn default_network() -> NetworkId {
    NetworkId::Mainnet
}

fn default_contract() -> ContractId {
    ContractId::default_voting()
}

fn default_wallet_url() -> String {
    "http://127.0.0.1:8765".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_concurrency() -> usize {
    1
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_contracts() -> BTreeMap<String, ContractId> {
    KnownContract::ALL
        .iter()
        .map(|c| (c.name().to_string(), c.contract_id()))
        .collect()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn api_url(&self) -> &str {
        self.api_url
            .as_deref()
            .unwrap_or_else(|| self.network.default_api_url())
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            network: self.network,
            api_url: self.api_url().trim_end_matches('/').to_string(),
            sender: self
                .sender
                .clone()
                .unwrap_or_else(|| self.contract.address.clone()),
            contract: self.contract.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }

    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            max_concurrency: self.max_concurrency,
            failure_policy: self.failure_policy,
            retries: self.retries,
            conflict_policy: self.conflict_policy,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    /// Reject settings the client cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::Invalid("max_concurrency must be at least 1".into()));
        }
        if !self.api_url().starts_with("http://") && !self.api_url().starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "api_url must be an http(s) URL: {}",
                self.api_url()
            )));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            api_url: None,
            contract: default_contract(),
            sender: None,
            wallet_url: default_wallet_url(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_concurrency: default_max_concurrency(),
            failure_policy: FailurePolicy::default(),
            retries: 0,
            conflict_policy: ConflictPolicy::default(),
            poll_interval_secs: default_poll_interval_secs(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            contracts: default_contracts(),
        }
    }
}
