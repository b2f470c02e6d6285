//! # Ecosystem Testing Infrastructure
//!
//! Testing utilities for ecosystem plugins:
//! - RPC-shaped transaction and receipt fixtures
//! - Edge case type tags
//! - Property-based testing strategies for field spellings and quantities
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ecosystem_testing::*;
//!
//! let receipt = RpcFixtures::internal_receipt();
//!
//! proptest! {
//!     #[test]
//!     fn test_gas_spellings(key in alias_of(GAS_LIMIT), (gas, raw) in quantity()) {
//!         // ...
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use ecosystem_traits::{FieldAliases, RawFields};
use proptest::prelude::*;
use serde_json::{json, Value};

// ============================================================================
// RPC Fixtures
// ============================================================================

/// Receipts and requests shaped the way Arbitrum nodes return them
pub struct RpcFixtures;

impl RpcFixtures {
    /// ArbOS address that sends internal transactions
    pub const ARBOS_ADDRESS: &'static str = "0x00000000000000000000000000000000000a4b05";

    /// ArbSys precompile, the receiver of internal transactions
    pub const ARBSYS_ADDRESS: &'static str = "0x0000000000000000000000000000000000000064";

    /// Plain externally-owned sender
    pub const SENDER: &'static str = "0x5fd6eb55d12e759a21c09ef703fe0cba1dc9d88d";

    /// Plain externally-owned receiver
    pub const RECEIVER: &'static str = "0x1e59ce931b4cfea3fe4b875411e280e173cb7a9c";

    /// Internal transaction emitted at the start of a block, as merged
    /// from `eth_getTransactionByHash` and `eth_getTransactionReceipt`
    pub fn internal_receipt() -> Value {
        json!({
            "blockHash": "0x0b2dc5d2e3c2e9a3bbd63f0c7d0a4b0e2b1f3a9d9e7f5c4b3a29180706050403",
            "blockNumber": "0x8d2a4f1",
            "chainId": "0xa4b1",
            "contractAddress": null,
            "cumulativeGasUsed": "0x0",
            "effectiveGasPrice": "0x0",
            "from": Self::ARBOS_ADDRESS,
            "gas": "0x0",
            "gasPrice": "0x0",
            "gasUsed": "0x0",
            "gasUsedForL1": "0x0",
            "hash": "0x3A2F0C6E1B9D8A7F6E5D4C3B2A1908F7E6D5C4B3A291807F6E5D4C3B2A190807",
            "input": "0x6bf6a42d00000000000000000000000000000000000000000000000000000000011a2b3c",
            "l1BlockNumber": "0x11a2b3c",
            "logs": [],
            "nonce": "0x0",
            "r": "0x0",
            "s": "0x0",
            "status": "0x1",
            "to": Self::ARBSYS_ADDRESS,
            "transactionIndex": "0x0",
            "type": "0x6a",
            "v": "0x0",
            "value": "0x0"
        })
    }

    /// Successful EIP-1559 token transfer with one `Transfer` log
    pub fn dynamic_receipt() -> Value {
        json!({
            "blockNumber": "0xa1b2c3",
            "chainId": "0xa4b1",
            "contractAddress": null,
            "effectiveGasPrice": "0x989680",
            "from": Self::SENDER,
            "gas": "0x186a0",
            "gasUsed": "0xb411",
            "input": "0xa9059cbb0000000000000000000000001e59ce931b4cfea3fe4b875411e280e173cb7a9c00000000000000000000000000000000000000000000000000000000000f4240",
            "logs": [{
                "address": "0xaf88d065e77c8cc2239327c5edb3a432268e5831",
                "topics": [
                    "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
                    "0x0000000000000000000000005fd6eb55d12e759a21c09ef703fe0cba1dc9d88d",
                    "0x0000000000000000000000001e59ce931b4cfea3fe4b875411e280e173cb7a9c"
                ],
                "data": "0x00000000000000000000000000000000000000000000000000000000000f4240",
                "logIndex": "0x3"
            }],
            "maxFeePerGas": "0x1312d00",
            "maxPriorityFeePerGas": "0x0",
            "nonce": "0x2a",
            "r": "0x8f3c6b1a5e2d4c7b9a0f1e2d3c4b5a69788796a5b4c3d2e1f0a9b8c7d6e5f4a3",
            "s": "0x1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8f90a",
            "status": "0x1",
            "to": "0xaf88d065e77c8cc2239327c5edb3a432268e5831",
            "transactionHash": "0x9c1e5b0f4a3d2c1b0a99887766554433221100ffeeddccbbaa99887766554433",
            "type": "0x2",
            "v": "0x1",
            "value": "0x0"
        })
    }

    /// Legacy transfer that reverted after using all of its gas
    pub fn legacy_receipt() -> Value {
        json!({
            "block_number": 12_345_678u64,
            "chain_id": 42161,
            "contract_address": null,
            "gas_limit": 21000,
            "gas_price": 100_000_000u64,
            "gas_used": 21000,
            "data": null,
            "nonce": 7,
            "receiver": Self::RECEIVER,
            "sender": Self::SENDER,
            "status": 0,
            "txn_hash": "0x0102030405060708091011121314151617181920212223242526272829303132",
            "value": "1000000000000000000"
        })
    }

    /// Unsigned dynamic-fee request, as a wallet would submit it
    pub fn dynamic_request() -> RawFields {
        RawFields::new()
            .with("from", Self::SENDER)
            .with("to", Self::RECEIVER)
            .with("value", "0xde0b6b3a7640000")
            .with("gasLimit", 21000)
            .with("maxFeePerGas", "0x1312d00")
            .with("maxPriorityFeePerGas", "0x0")
    }
}

// ============================================================================
// Edge Case Type Tags
// ============================================================================

/// Type tags at the edges of what an Arbitrum node can report
pub struct EdgeCaseTypes;

impl EdgeCaseTypes {
    /// Tags nodes know that are not modeled as transaction shapes
    /// (blob, deposit, unsigned, contract, retryable, submit-retryable,
    /// legacy-arbitrum)
    pub const UNSUPPORTED: &'static [&'static str] =
        &["0x3", "0x64", "0x65", "0x66", "0x68", "0x69", "0x78", "0x7e"];

    /// Spellings of the internal type tag
    pub fn internal_spellings() -> Vec<Value> {
        vec![
            json!(106),
            json!("0x6a"),
            json!("0x6A"),
            json!("6a"),
            json!([0x6a]),
            json!("internal"),
            json!("INTERNAL"),
        ]
    }
}

// ============================================================================
// Property-Based Testing Strategies
// ============================================================================

/// Picks one accepted spelling of a field
pub fn alias_of(field: FieldAliases) -> impl Strategy<Value = &'static str> {
    prop::sample::select(field.aliases)
}

/// Encodes a quantity the ways callers and nodes send it: JSON integer,
/// decimal string, or `0x` hex string
pub fn quantity_encoding(value: u64) -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!(value)),
        Just(json!(value.to_string())),
        Just(json!(format!("{value:#x}"))),
    ]
}

/// Generates a quantity together with one of its encodings
pub fn quantity() -> impl Strategy<Value = (u64, Value)> {
    any::<u64>().prop_flat_map(|value| (Just(value), quantity_encoding(value)))
}

/// Generates a fee in wei, below the point where fee arithmetic overflows u64
pub fn fee_quantity() -> impl Strategy<Value = (u64, Value)> {
    (0u64..=1_000_000_000_000u64).prop_flat_map(|value| (Just(value), quantity_encoding(value)))
}

/// Generates a lowercase `0x`-prefixed 20-byte address
pub fn address_hex() -> impl Strategy<Value = String> {
    prop::array::uniform20(any::<u8>()).prop_map(|bytes| format!("0x{}", hex::encode(bytes)))
}

/// Generates call data as a `0x`-prefixed hex string
pub fn calldata_hex() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<u8>(), 0..64).prop_map(|bytes| format!("0x{}", hex::encode(bytes)))
}

// ============================================================================
// Tests
// ============================================================================
