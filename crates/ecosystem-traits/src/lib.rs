//! # Ecosystem Traits
//!
//! Capability traits for EVM ecosystem plugins. A host framework talks to
//! every chain family through the [`Ecosystem`] trait: it enumerates the
//! family's networks and providers, builds transactions from loosely-typed
//! field mappings, and decodes receipts returned by nodes.
//!
//! ## Core Pieces
//!
//! - [`Ecosystem`] - network registry plus transaction/receipt normalization
//! - [`RawFields`] / [`FieldAliases`] - open field mappings and alias tables
//! - [`ActiveConnection`] - the connection snapshot defaults are read from
//!
//! ## Example
//!
//! ```ignore
//! use ecosystem_traits::prelude::*;
//!
//! fn build<E: Ecosystem>(ecosystem: &E, fields: RawFields) -> Result<E::Transaction> {
//!     ecosystem.create_transaction(fields, None)
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fields;
pub mod network;

pub use ecosystem_error::{EcosystemError, ErrorCode, ErrorContext, Result};
pub use fields::{FieldAliases, RawFields};
pub use network::{
    config_key, ActiveConnection, GasLimit, NetworkDefinition, NetworkKind, ProviderRegistration,
};

/// A family of compatible networks and the shape of its transactions.
///
/// Implementations are stateless with respect to calls: every method is a
/// synchronous mapping, and connection-dependent defaults come in through
/// the explicit `connection` argument.
pub trait Ecosystem {
    /// Normalized transaction record
    type Transaction;
    /// Normalized receipt record
    type Receipt;

    /// Ecosystem name (e.g. "arbitrum")
    fn name(&self) -> &str;

    /// Every network the ecosystem contributes, in display order
    fn networks(&self) -> Vec<NetworkDefinition>;

    /// Every provider registration the ecosystem contributes
    fn providers(&self) -> Vec<ProviderRegistration>;

    /// Name of the network used when the caller names none
    fn default_network(&self) -> &str;

    /// Name of the default provider for a network, if one is configured
    fn default_provider(&self, network: &str) -> Option<String>;

    /// Builds a normalized transaction from an open field mapping
    fn create_transaction(
        &self,
        fields: RawFields,
        connection: Option<&ActiveConnection>,
    ) -> Result<Self::Transaction>;

    /// Decodes a receipt from an open field mapping
    fn decode_receipt(
        &self,
        fields: RawFields,
        connection: Option<&ActiveConnection>,
    ) -> Result<Self::Receipt>;

    /// Looks up a network by name
    fn network(&self, name: &str) -> Result<NetworkDefinition> {
        self.networks()
            .into_iter()
            .find(|network| network.name == name)
            .ok_or_else(|| EcosystemError::UnknownNetwork {
                ecosystem: self.name().to_string(),
                network: name.to_string(),
            })
    }

    /// Provider names registered for a network, in registration order
    fn providers_for(&self, network: &str) -> Vec<String> {
        self.providers()
            .into_iter()
            .filter(|registration| registration.network == network)
            .map(|registration| registration.provider)
            .collect()
    }

    /// Renders this ecosystem's entries for the host's "list networks"
    /// command. Networks without a registered provider are not listed.
    fn network_tree(&self) -> String {
        let listed: Vec<(NetworkDefinition, Vec<String>)> = self
            .networks()
            .into_iter()
            .map(|network| {
                let providers = self.providers_for(&network.name);
                (network, providers)
            })
            .filter(|(_, providers)| !providers.is_empty())
            .collect();

        let mut lines = vec![self.name().to_string()];
        for (index, (network, providers)) in listed.iter().enumerate() {
            let last_network = index + 1 == listed.len();
            let (branch, indent) = if last_network {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };

            let mut line = format!("{branch}{}", network.name);
            if network.name == self.default_network() {
                line.push_str("  (default)");
            }
            lines.push(line);

            let default_provider = self.default_provider(&network.name);
            for (p_index, provider) in providers.iter().enumerate() {
                let p_branch = if p_index + 1 == providers.len() {
                    "└── "
                } else {
                    "├── "
                };
                let mut line = format!("{indent}{p_branch}{provider}");
                if default_provider.as_deref() == Some(provider.as_str()) {
                    line.push_str("  (default)");
                }
                lines.push(line);
            }
        }
        lines.join("\n")
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ActiveConnection, Ecosystem, EcosystemError, FieldAliases, GasLimit, NetworkDefinition,
        NetworkKind, ProviderRegistration, RawFields, Result,
    };
}
