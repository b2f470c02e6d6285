//! The Arbitrum ecosystem plugin

use ecosystem_traits::{
    ActiveConnection, Ecosystem, EcosystemError, NetworkDefinition, ProviderRegistration,
    RawFields, Result,
};

use crate::config::{ArbitrumConfig, NetworkConfig};
use crate::networks;
use crate::receipt::{ArbitrumReceipt, ReceiptDecoder};
use crate::transaction::{ArbitrumTransaction, TransactionBuilder};

/// Name the ecosystem registers under
pub const ECOSYSTEM_NAME: &str = "arbitrum";

/// Arbitrum ecosystem: networks, providers, and the transaction and
/// receipt shapes of Arbitrum chains
#[derive(Debug, Clone, Default)]
pub struct Arbitrum {
    config: ArbitrumConfig,
}

impl Arbitrum {
    /// Creates the ecosystem with the given configuration
    pub fn new(config: ArbitrumConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &ArbitrumConfig {
        &self.config
    }

    /// Settings of a network, falling back to fork defaults for networks
    /// the config does not mention
    fn settings(&self, network: &NetworkDefinition) -> NetworkConfig {
        self.config
            .network_config(&network.name)
            .cloned()
            .unwrap_or_default()
    }

    /// Resolves a network and provider into a connection snapshot. When no
    /// provider is named, the network's default provider is used.
    pub fn connect(&self, network: &str, provider: Option<&str>) -> Result<ActiveConnection> {
        let definition = self.network(network)?;
        let registered = self.providers_for(&definition.name);

        let provider = match provider {
            Some(name) if registered.iter().any(|p| p == name) => name.to_string(),
            Some(name) => {
                return Err(EcosystemError::UnknownProvider {
                    network: definition.name,
                    provider: name.to_string(),
                })
            }
            None => self.default_provider(&definition.name).ok_or_else(|| {
                EcosystemError::ConfigError(format!(
                    "no provider configured for network '{}'",
                    definition.name
                ))
            })?,
        };

        let settings = self.settings(&definition);
        tracing::debug!(
            network = %definition.name,
            provider = %provider,
            gas_limit = %settings.gas_limit,
            "connected"
        );

        Ok(ActiveConnection {
            ecosystem: ECOSYSTEM_NAME.to_string(),
            network: definition.name,
            provider,
            chain_id: definition.chain_id,
            required_confirmations: settings.required_confirmations,
            gas_limit: settings.gas_limit,
        })
    }
}

impl Ecosystem for Arbitrum {
    type Transaction = ArbitrumTransaction;
    type Receipt = ArbitrumReceipt;

    fn name(&self) -> &str {
        ECOSYSTEM_NAME
    }

    fn networks(&self) -> Vec<NetworkDefinition> {
        networks::networks()
    }

    fn providers(&self) -> Vec<ProviderRegistration> {
        networks::providers()
    }

    fn default_network(&self) -> &str {
        &self.config.default_network
    }

    fn default_provider(&self, network: &str) -> Option<String> {
        self.config
            .network_config(network)
            .and_then(|settings| settings.default_provider.clone())
            .or_else(|| self.providers_for(network).into_iter().next())
    }

    fn create_transaction(
        &self,
        fields: RawFields,
        connection: Option<&ActiveConnection>,
    ) -> Result<ArbitrumTransaction> {
        TransactionBuilder::new(&self.config, connection).build(fields)
    }

    fn decode_receipt(
        &self,
        fields: RawFields,
        connection: Option<&ActiveConnection>,
    ) -> Result<ArbitrumReceipt> {
        ReceiptDecoder::new(&self.config, connection).decode(fields)
    }
}
