//! Transaction building and network registry tests for the Arbitrum ecosystem
//!
//! Tests cover:
//! - Field aliases and value coercion
//! - Type inference and explicit type tags
//! - Shape validation per type
//! - Defaults read from the active connection
//! - Network and provider registry

use alloy::primitives::{address, Address, Bytes, B256, U256};
use arbitrum_ecosystem::{Arbitrum, ArbitrumConfig, TransactionType};
use ecosystem_testing::{EdgeCaseTypes, RpcFixtures};
use ecosystem_traits::{Ecosystem, EcosystemError, ErrorCode, GasLimit, RawFields};
use serde_json::json;

fn fields(value: serde_json::Value) -> RawFields {
    RawFields::from_value(value).unwrap()
}

// ============================================================================
// Aliases and Coercion
// ============================================================================

mod alias_tests {
    use super::*;

    #[test]
    fn test_gas_limit_spellings_agree() {
        let arbitrum = Arbitrum::default();
        for key in ["gas", "gas_limit", "gasLimit"] {
            let tx = arbitrum
                .create_transaction(fields(json!({ key: "0x5208" })), None)
                .unwrap();
            assert_eq!(tx.gas_limit, Some(21000), "{key}");
        }
    }

    #[test]
    fn test_input_is_data() {
        let arbitrum = Arbitrum::default();
        let a = arbitrum
            .create_transaction(fields(json!({ "input": "0xdeadbeef" })), None)
            .unwrap();
        let b = arbitrum
            .create_transaction(fields(json!({ "data": "0xdeadbeef" })), None)
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.data, Bytes::from(vec![0xde, 0xad, 0xbe, 0xef]));
    }

    #[test]
    fn test_null_data_is_empty() {
        let tx = Arbitrum::default()
            .create_transaction(fields(json!({ "data": null })), None)
            .unwrap();
        assert!(tx.data.is_empty());
    }

    #[test]
    fn test_hex_chain_id() {
        let tx = Arbitrum::default()
            .create_transaction(fields(json!({ "chainId": "0xa4b1" })), None)
            .unwrap();
        assert_eq!(tx.chain_id, Some(42161));
    }

    #[test]
    fn test_sender_and_receiver_aliases() {
        let tx = Arbitrum::default()
            .create_transaction(
                fields(json!({ "from": RpcFixtures::SENDER, "receiver": RpcFixtures::RECEIVER })),
                None,
            )
            .unwrap();
        assert_eq!(
            tx.sender,
            Some(address!("5fd6eb55d12e759a21c09ef703fe0cba1dc9d88d"))
        );
        assert_eq!(
            tx.receiver,
            Some(address!("1e59ce931b4cfea3fe4b875411e280e173cb7a9c"))
        );
    }

    #[test]
    fn test_first_alias_wins() {
        let tx = Arbitrum::default()
            .create_transaction(fields(json!({ "gas": 1, "gasLimit": 2 })), None)
            .unwrap();
        assert_eq!(tx.gas_limit, Some(1));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let tx = Arbitrum::default()
            .create_transaction(fields(json!({ "blockHash": "0x00", "yParity": "0x1" })), None)
            .unwrap();
        assert_eq!(tx.tx_type(), TransactionType::Static);
    }

    #[test]
    fn test_bad_quantity_names_field() {
        let err = Arbitrum::default()
            .create_transaction(fields(json!({ "nonce": "seven" })), None)
            .unwrap_err();
        assert_eq!(err.field(), Some("nonce"));
        assert_eq!(err.code(), ErrorCode::Validation);
    }

    #[test]
    fn test_bad_address() {
        let err = Arbitrum::default()
            .create_transaction(fields(json!({ "to": "0x1234" })), None)
            .unwrap_err();
        assert_eq!(err.field(), Some("receiver"));
    }
}

// ============================================================================
// Type Selection
// ============================================================================

mod type_tests {
    use super::*;

    #[test]
    fn test_default_type_without_hints() {
        let tx = Arbitrum::default()
            .create_transaction(RawFields::new(), None)
            .unwrap();
        assert_eq!(tx.tx_type(), TransactionType::Static);
    }

    #[test]
    fn test_configured_default_type() {
        let config = ArbitrumConfig::from_json_value(json!({
            "sepolia": { "default_transaction_type": "dynamic" }
        }))
        .unwrap();
        let arbitrum = Arbitrum::new(config);

        let on_sepolia = arbitrum.connect("sepolia", None).unwrap();
        let on_mainnet = arbitrum.connect("mainnet", None).unwrap();

        let tx = arbitrum
            .create_transaction(RawFields::new(), Some(&on_sepolia))
            .unwrap();
        assert_eq!(tx.tx_type(), TransactionType::Dynamic);

        let tx = arbitrum
            .create_transaction(RawFields::new(), Some(&on_mainnet))
            .unwrap();
        assert_eq!(tx.tx_type(), TransactionType::Static);
    }

    #[test]
    fn test_default_network_type_without_connection() {
        let config = ArbitrumConfig::from_json_value(json!({
            "default_network": "local",
            "local": { "default_transaction_type": 2 }
        }))
        .unwrap();
        let tx = Arbitrum::new(config)
            .create_transaction(RawFields::new(), None)
            .unwrap();
        assert_eq!(tx.tx_type(), TransactionType::Dynamic);
    }

    #[test]
    fn test_gas_price_infers_static() {
        for key in ["gas_price", "gasPrice"] {
            let tx = Arbitrum::default()
                .create_transaction(fields(json!({ key: 1_000_000_000u64 })), None)
                .unwrap();
            assert_eq!(tx.tx_type(), TransactionType::Static);
            assert_eq!(tx.gas_price(), Some(1_000_000_000));
        }
    }

    #[test]
    fn test_max_fees_infer_dynamic() {
        for key in ["max_fee", "maxFee", "maxFeePerGas", "max_priority_fee", "maxPriorityFeePerGas"] {
            let tx = Arbitrum::default()
                .create_transaction(fields(json!({ key: "0x1" })), None)
                .unwrap();
            assert_eq!(tx.tx_type(), TransactionType::Dynamic, "{key}");
        }
    }

    #[test]
    fn test_gas_price_beats_max_fee() {
        let err = Arbitrum::default()
            .create_transaction(fields(json!({ "gasPrice": 1, "maxFeePerGas": 2 })), None)
            .unwrap_err();
        assert_eq!(err.field(), Some("max_fee"));
    }

    #[test]
    fn test_access_list_infers_access_list() {
        let tx = Arbitrum::default()
            .create_transaction(
                fields(json!({
                    "accessList": [{
                        "address": RpcFixtures::RECEIVER,
                        "storageKeys": ["0x0000000000000000000000000000000000000000000000000000000000000001"]
                    }]
                })),
                None,
            )
            .unwrap();
        assert_eq!(tx.tx_type(), TransactionType::AccessList);
        assert_eq!(tx.access_list().unwrap().0.len(), 1);
    }

    #[test]
    fn test_explicit_type_overrides_inference() {
        let tx = Arbitrum::default()
            .create_transaction(fields(json!({ "type": "0x2", "gasPrice": 5 })), None)
            .unwrap();
        assert_eq!(tx.tx_type(), TransactionType::Dynamic);
        assert_eq!(tx.gas_price(), None);
    }

    #[test]
    fn test_internal_regardless_of_hints() {
        for tag in EdgeCaseTypes::internal_spellings() {
            let tx = Arbitrum::default()
                .create_transaction(
                    fields(json!({
                        "type": tag,
                        "gasPrice": 1,
                        "maxFeePerGas": 2,
                        "accessList": [],
                    })),
                    None,
                )
                .unwrap();
            assert_eq!(tx.tx_type(), TransactionType::Internal);
            assert_eq!(tx.gas_price(), None);
            assert_eq!(tx.max_fee(), None);
            assert!(tx.access_list().is_none());
        }
    }

    #[test]
    fn test_unsupported_explicit_type() {
        for tag in EdgeCaseTypes::UNSUPPORTED {
            let err = Arbitrum::default()
                .create_transaction(fields(json!({ "type": tag })), None)
                .unwrap_err();
            assert_eq!(
                err,
                EcosystemError::UnsupportedTransactionType {
                    value: tag.to_string()
                }
            );
        }
    }

    #[test]
    fn test_null_type_is_inferred() {
        let tx = Arbitrum::default()
            .create_transaction(fields(json!({ "type": null, "maxFeePerGas": 1 })), None)
            .unwrap();
        assert_eq!(tx.tx_type(), TransactionType::Dynamic);
    }
}

// ============================================================================
// Shape Validation
// ============================================================================

mod shape_tests {
    use super::*;

    #[test]
    fn test_static_rejects_access_list() {
        let err = Arbitrum::default()
            .create_transaction(fields(json!({ "type": 0, "accessList": [] })), None)
            .unwrap_err();
        assert_eq!(err.field(), Some("access_list"));
    }

    #[test]
    fn test_access_list_rejects_priority_fee() {
        let err = Arbitrum::default()
            .create_transaction(fields(json!({ "type": 1, "maxPriorityFeePerGas": 1 })), None)
            .unwrap_err();
        assert_eq!(err.field(), Some("max_priority_fee"));
    }

    #[test]
    fn test_access_list_keeps_gas_price() {
        let tx = Arbitrum::default()
            .create_transaction(fields(json!({ "type": "access_list", "gasPrice": 7 })), None)
            .unwrap();
        assert_eq!(tx.gas_price(), Some(7));
        assert!(tx.access_list().is_some_and(|list| list.0.is_empty()));
    }

    #[test]
    fn test_internal_zero_signature_dropped() {
        let tx = Arbitrum::default()
            .create_transaction(
                fields(json!({ "type": "0x6a", "v": "0x0", "r": "0x0", "s": "0x0" })),
                None,
            )
            .unwrap();
        assert!(!tx.is_signed());
    }

    #[test]
    fn test_internal_rejects_real_signature() {
        let err = Arbitrum::default()
            .create_transaction(
                fields(json!({ "type": "0x6a", "v": 27, "r": "0x1", "s": "0x2" })),
                None,
            )
            .unwrap_err();
        assert_eq!(err.field(), Some("signature"));
    }

    #[test]
    fn test_full_signature_combined() {
        let tx = Arbitrum::default()
            .create_transaction(fields(json!({ "v": 27, "r": "0x1", "s": "0x2" })), None)
            .unwrap();
        let signature = tx.signature.unwrap();
        assert_eq!(signature.v, 27);
        assert_eq!(signature.s, B256::with_last_byte(2));
    }

    #[test]
    fn test_partial_signature_dropped() {
        let tx = Arbitrum::default()
            .create_transaction(fields(json!({ "v": 27, "r": "0x1" })), None)
            .unwrap();
        assert!(tx.signature.is_none());
    }
}

// ============================================================================
// Connection Defaults
// ============================================================================

mod connection_tests {
    use super::*;

    #[test]
    fn test_defaults_from_connection() {
        let arbitrum = Arbitrum::default();
        let connection = arbitrum.connect("sepolia", None).unwrap();

        let tx = arbitrum
            .create_transaction(RpcFixtures::dynamic_request(), Some(&connection))
            .unwrap();

        assert_eq!(tx.chain_id, Some(421614));
        assert_eq!(tx.required_confirmations, 1);
        assert_eq!(tx.gas_limit, Some(21000));
        assert_eq!(tx.value, U256::from(1_000_000_000_000_000_000u64));
    }

    #[test]
    fn test_explicit_values_beat_connection() {
        let arbitrum = Arbitrum::default();
        let connection = arbitrum
            .connect("mainnet", None)
            .unwrap()
            .with_required_confirmations(12);

        let tx = arbitrum
            .create_transaction(
                fields(json!({ "chainId": 1, "requiredConfirmations": 3 })),
                Some(&connection),
            )
            .unwrap();
        assert_eq!(tx.chain_id, Some(1));
        assert_eq!(tx.required_confirmations, 3);
    }

    #[test]
    fn test_no_connection_means_zero_confirmations() {
        let tx = Arbitrum::default()
            .create_transaction(RawFields::new(), None)
            .unwrap();
        assert_eq!(tx.required_confirmations, 0);
        assert_eq!(tx.chain_id, None);
    }

    #[test]
    fn test_local_gas_limit_default() {
        let arbitrum = Arbitrum::default();
        let connection = arbitrum.connect("local", None).unwrap().with_chain_id(1337);
        assert_eq!(connection.gas_limit, GasLimit::Exact(30_000_000));

        let tx = arbitrum
            .create_transaction(RawFields::new(), Some(&connection))
            .unwrap();
        assert_eq!(tx.gas_limit, Some(30_000_000));
        assert_eq!(tx.chain_id, Some(1337));
    }
}

// ============================================================================
// Round Trips
// ============================================================================

mod round_trip_tests {
    use super::*;

    #[test]
    fn test_to_fields_is_idempotent() {
        let arbitrum = Arbitrum::default();
        let connection = arbitrum.connect("mainnet", None).unwrap();
        let inputs = [
            RpcFixtures::dynamic_request(),
            fields(json!({ "gasPrice": "0x5f5e100", "nonce": 3, "v": 28, "r": "0x1", "s": "0x2" })),
            fields(json!({ "type": 1, "accessList": [{ "address": RpcFixtures::SENDER, "storageKeys": [] }] })),
            fields(RpcFixtures::internal_receipt()),
        ];

        for input in inputs {
            let tx = arbitrum.create_transaction(input, Some(&connection)).unwrap();
            let rebuilt = arbitrum.create_transaction(tx.to_fields(), None).unwrap();
            assert_eq!(rebuilt, tx);
        }
    }

    #[test]
    fn test_to_fields_shape() {
        let tx = Arbitrum::default()
            .create_transaction(RpcFixtures::dynamic_request(), None)
            .unwrap();
        let rendered = tx.to_fields();

        assert_eq!(rendered.get("type"), Some(&json!("0x2")));
        assert_eq!(rendered.get("gas"), Some(&json!("0x5208")));
        assert_eq!(rendered.get("maxFeePerGas"), Some(&json!("0x1312d00")));
        assert!(!rendered.contains_key("gasPrice"));
    }
}

// ============================================================================
// Network Registry
// ============================================================================

mod registry_tests {
    use super::*;

    #[test]
    fn test_network_tree() {
        let expected = "\
arbitrum
├── mainnet  (default)
│   └── node  (default)
├── goerli
│   └── node  (default)
├── sepolia
│   └── node  (default)
└── local
    └── test  (default)";
        assert_eq!(Arbitrum::default().network_tree(), expected);
    }

    #[test]
    fn test_networks_include_forks() {
        let arbitrum = Arbitrum::default();
        let fork = arbitrum.network("goerli-fork").unwrap();
        assert!(fork.is_fork());
        assert_eq!(fork.chain_id, Some(421613));
        assert!(arbitrum.providers_for("goerli-fork").is_empty());
    }

    #[test]
    fn test_unknown_network() {
        let err = Arbitrum::default().network("nova").unwrap_err();
        assert_eq!(
            err,
            EcosystemError::UnknownNetwork {
                ecosystem: "arbitrum".into(),
                network: "nova".into()
            }
        );
    }

    #[test]
    fn test_zero_address_parses() {
        let tx = Arbitrum::default()
            .create_transaction(fields(json!({ "to": format!("{}", Address::ZERO) })), None)
            .unwrap();
        assert_eq!(tx.receiver, Some(Address::ZERO));
    }
}
