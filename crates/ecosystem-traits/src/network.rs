//! Network and provider registration types

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a registered network relates to a live chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    /// A public chain reached through a node
    Live,
    /// A local fork of a live chain
    Fork,
    /// A local development chain
    Local,
}

/// A network an ecosystem contributes to the host's registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDefinition {
    /// Network name (e.g. "mainnet", "sepolia-fork", "local")
    pub name: String,
    /// Chain ID; local networks get theirs from the development provider
    pub chain_id: Option<u64>,
    /// Network ID, equal to the chain ID on every EVM network we know of
    pub network_id: Option<u64>,
    /// Live, fork, or local
    pub kind: NetworkKind,
}

impl NetworkDefinition {
    /// Suffix appended to a live network's name to form its fork
    pub const FORK_SUFFIX: &'static str = "-fork";

    /// Name of the local development network
    pub const LOCAL: &'static str = "local";

    /// Creates a live network whose network ID equals its chain ID
    pub fn live(name: impl Into<String>, chain_id: u64) -> Self {
        Self {
            name: name.into(),
            chain_id: Some(chain_id),
            network_id: Some(chain_id),
            kind: NetworkKind::Live,
        }
    }

    /// Creates the fork counterpart of a live network
    pub fn fork_of(upstream: &NetworkDefinition) -> Self {
        Self {
            name: format!("{}{}", upstream.name, Self::FORK_SUFFIX),
            chain_id: upstream.chain_id,
            network_id: upstream.network_id,
            kind: NetworkKind::Fork,
        }
    }

    /// Creates the local development network
    pub fn local() -> Self {
        Self {
            name: Self::LOCAL.to_string(),
            chain_id: None,
            network_id: None,
            kind: NetworkKind::Local,
        }
    }

    /// Sets the chain ID (and network ID)
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self.network_id = Some(chain_id);
        self
    }

    /// Returns true for fork networks
    pub fn is_fork(&self) -> bool {
        self.kind == NetworkKind::Fork
    }

    /// Returns true for the local development network
    pub fn is_local(&self) -> bool {
        self.kind == NetworkKind::Local
    }

    /// Key of this network in a configuration file (`-` becomes `_`)
    pub fn config_key(&self) -> String {
        config_key(&self.name)
    }
}

/// Normalizes a network name into its configuration key
pub fn config_key(network: &str) -> String {
    network.replace('-', "_")
}

/// A provider (connection backend) made available for a network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRegistration {
    /// Ecosystem name
    pub ecosystem: String,
    /// Network name
    pub network: String,
    /// Provider name (e.g. "node", "test")
    pub provider: String,
}

impl ProviderRegistration {
    /// Creates a new registration
    pub fn new(
        ecosystem: impl Into<String>,
        network: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            ecosystem: ecosystem.into(),
            network: network.into(),
            provider: provider.into(),
        }
    }
}

/// Default gas limit policy for a network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "GasLimitRepr", into = "GasLimitRepr")]
pub enum GasLimit {
    /// Let the provider estimate
    #[default]
    Auto,
    /// Use the block gas limit
    Max,
    /// A fixed limit
    Exact(u64),
}

impl GasLimit {
    /// Returns the fixed limit, if one is configured
    pub fn exact(&self) -> Option<u64> {
        match self {
            GasLimit::Exact(limit) => Some(*limit),
            _ => None,
        }
    }
}

impl fmt::Display for GasLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GasLimit::Auto => write!(f, "auto"),
            GasLimit::Max => write!(f, "max"),
            GasLimit::Exact(limit) => write!(f, "{limit}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum GasLimitRepr {
    Number(u64),
    Text(String),
}

impl TryFrom<GasLimitRepr> for GasLimit {
    type Error = String;

    fn try_from(repr: GasLimitRepr) -> Result<Self, Self::Error> {
        match repr {
            GasLimitRepr::Number(limit) => Ok(GasLimit::Exact(limit)),
            GasLimitRepr::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "auto" => Ok(GasLimit::Auto),
                "max" => Ok(GasLimit::Max),
                other => {
                    let parsed = match other.strip_prefix("0x") {
                        Some(digits) => u64::from_str_radix(digits, 16),
                        None => other.parse(),
                    };
                    parsed
                        .map(GasLimit::Exact)
                        .map_err(|_| format!("invalid gas limit '{text}'"))
                }
            },
        }
    }
}

impl From<GasLimit> for GasLimitRepr {
    fn from(limit: GasLimit) -> Self {
        match limit {
            GasLimit::Exact(limit) => GasLimitRepr::Number(limit),
            other => GasLimitRepr::Text(other.to_string()),
        }
    }
}

/// Immutable snapshot of the connection a call is made under.
///
/// Builders read their defaults (chain id, confirmations, gas limit) from
/// here instead of from process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveConnection {
    /// Ecosystem name
    pub ecosystem: String,
    /// Network name
    pub network: String,
    /// Provider name
    pub provider: String,
    /// Chain ID reported by the connection, if known
    pub chain_id: Option<u64>,
    /// Confirmations required before a transaction counts as final
    pub required_confirmations: u64,
    /// Gas limit policy of the network
    pub gas_limit: GasLimit,
}

impl ActiveConnection {
    /// Sets the chain ID, e.g. once a development provider reports it
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Overrides the required confirmations
    pub fn with_required_confirmations(mut self, confirmations: u64) -> Self {
        self.required_confirmations = confirmations;
        self
    }
}
