//! Arbitrum network configuration

use std::collections::BTreeMap;
use std::path::Path;

use ecosystem_traits::{config_key, EcosystemError, ErrorContext, GasLimit, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::transaction::TransactionType;

/// Arbitrum One Mainnet chain ID
pub const ARBITRUM_ONE_CHAIN_ID: u64 = 42161;

/// Arbitrum Goerli testnet chain ID
pub const ARBITRUM_GOERLI_CHAIN_ID: u64 = 421613;

/// Arbitrum Sepolia testnet chain ID
pub const ARBITRUM_SEPOLIA_CHAIN_ID: u64 = 421614;

/// Gas limit used on the local network. Arbitrum's block gas limit is far
/// too high to use as a per-transaction default.
pub const LOCAL_GAS_LIMIT: u64 = 30_000_000;

/// Per-network settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Confirmations required before a transaction counts as final
    pub required_confirmations: u64,
    /// Average block time in seconds
    pub block_time: u64,
    /// Default gas limit policy
    pub gas_limit: GasLimit,
    /// Provider used when the caller names none
    pub default_provider: Option<String>,
    /// Type used when a transaction neither names one nor implies one
    pub default_transaction_type: TransactionType,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            required_confirmations: 0,
            block_time: 0,
            gas_limit: GasLimit::Auto,
            default_provider: None,
            default_transaction_type: TransactionType::Static,
        }
    }
}

impl NetworkConfig {
    /// Defaults for a live network
    pub fn live() -> Self {
        Self {
            required_confirmations: 1,
            block_time: 1,
            ..Self::default()
        }
    }

    /// Defaults for a fork of a live network
    pub fn fork() -> Self {
        Self::default()
    }

    /// Defaults for the local development network
    pub fn local() -> Self {
        Self {
            gas_limit: GasLimit::Exact(LOCAL_GAS_LIMIT),
            default_provider: Some("test".to_string()),
            ..Self::default()
        }
    }
}

/// Configuration of the Arbitrum ecosystem.
///
/// Keys use `_` where network names use `-` (`mainnet_fork` configures
/// `mainnet-fork`). Unknown keys are kept as custom networks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArbitrumConfig {
    /// Arbitrum One
    pub mainnet: NetworkConfig,
    /// Local fork of Arbitrum One
    pub mainnet_fork: NetworkConfig,
    /// Arbitrum Goerli
    pub goerli: NetworkConfig,
    /// Local fork of Arbitrum Goerli
    pub goerli_fork: NetworkConfig,
    /// Arbitrum Sepolia
    pub sepolia: NetworkConfig,
    /// Local fork of Arbitrum Sepolia
    pub sepolia_fork: NetworkConfig,
    /// Local development network
    pub local: NetworkConfig,
    /// Network used when the caller names none
    pub default_network: String,
    /// Networks configured by the user
    #[serde(flatten)]
    pub custom: BTreeMap<String, NetworkConfig>,
}

impl Default for ArbitrumConfig {
    fn default() -> Self {
        Self {
            mainnet: NetworkConfig::live(),
            mainnet_fork: NetworkConfig::fork(),
            goerli: NetworkConfig::live(),
            goerli_fork: NetworkConfig::fork(),
            sepolia: NetworkConfig::live(),
            sepolia_fork: NetworkConfig::fork(),
            local: NetworkConfig::local(),
            default_network: "mainnet".to_string(),
            custom: BTreeMap::new(),
        }
    }
}

impl ArbitrumConfig {
    /// Builds a config by layering user values over the defaults. Settings
    /// a network section leaves out keep their default.
    pub fn from_json_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(EcosystemError::ConfigError(
                "arbitrum config must be a JSON object".to_string(),
            ));
        }
        let mut merged = serde_json::to_value(Self::default())?;
        merge(&mut merged, value);
        serde_json::from_value(merged)
            .map_err(|e| EcosystemError::ConfigError(format!("invalid arbitrum config: {e}")))
    }

    /// Parses a config from a JSON document
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Self::from_json_value(serde_json::from_str(raw)?)
    }

    /// Loads a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_json_str(&raw)?;
        tracing::debug!(path = %path.display(), "loaded arbitrum config");
        Ok(config)
    }

    /// Settings for a network, by network name or config key
    pub fn network_config(&self, network: &str) -> Option<&NetworkConfig> {
        match config_key(network).as_str() {
            "mainnet" => Some(&self.mainnet),
            "mainnet_fork" => Some(&self.mainnet_fork),
            "goerli" => Some(&self.goerli),
            "goerli_fork" => Some(&self.goerli_fork),
            "sepolia" => Some(&self.sepolia),
            "sepolia_fork" => Some(&self.sepolia_fork),
            "local" => Some(&self.local),
            key => self.custom.get(key),
        }
    }
}

fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
