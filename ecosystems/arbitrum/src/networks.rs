//! Networks and providers the Arbitrum ecosystem registers

use ecosystem_traits::{NetworkDefinition, ProviderRegistration};

use crate::config::{ARBITRUM_GOERLI_CHAIN_ID, ARBITRUM_ONE_CHAIN_ID, ARBITRUM_SEPOLIA_CHAIN_ID};
use crate::ecosystem::ECOSYSTEM_NAME;

/// Provider backed by a regular JSON-RPC node
pub const NODE_PROVIDER: &str = "node";

/// In-process test provider used on the local network
pub const TEST_PROVIDER: &str = "test";

/// Live networks and their chain IDs
pub const NETWORKS: &[(&str, u64)] = &[
    ("mainnet", ARBITRUM_ONE_CHAIN_ID),
    ("goerli", ARBITRUM_GOERLI_CHAIN_ID),
    ("sepolia", ARBITRUM_SEPOLIA_CHAIN_ID),
];

/// Every network, each live network followed by its fork, then `local`
pub fn networks() -> Vec<NetworkDefinition> {
    let mut all = Vec::with_capacity(NETWORKS.len() * 2 + 1);
    for (name, chain_id) in NETWORKS {
        let live = NetworkDefinition::live(*name, *chain_id);
        let fork = NetworkDefinition::fork_of(&live);
        all.push(live);
        all.push(fork);
    }
    all.push(NetworkDefinition::local());
    all
}

/// Provider registrations. Forks get no provider of their own; a fork
/// plugin registers one when installed.
pub fn providers() -> Vec<ProviderRegistration> {
    NETWORKS
        .iter()
        .map(|(name, _)| ProviderRegistration::new(ECOSYSTEM_NAME, *name, NODE_PROVIDER))
        .chain(std::iter::once(ProviderRegistration::new(
            ECOSYSTEM_NAME,
            NetworkDefinition::LOCAL,
            TEST_PROVIDER,
        )))
        .collect()
}
