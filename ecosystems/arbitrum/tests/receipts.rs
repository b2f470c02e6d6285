//! Receipt decoding tests against RPC-shaped fixtures

use alloy::primitives::{address, U256};
use arbitrum_ecosystem::{Arbitrum, ReceiptStatus, TransactionType};
use ecosystem_testing::RpcFixtures;
use ecosystem_traits::{Ecosystem, EcosystemError, RawFields};
use serde_json::{json, Value};

fn decode(value: Value) -> Result<arbitrum_ecosystem::ArbitrumReceipt, EcosystemError> {
    Arbitrum::default().decode_receipt(RawFields::from_value(value).unwrap(), None)
}

#[test]
fn test_internal_transaction_receipt() {
    let receipt = decode(RpcFixtures::internal_receipt()).unwrap();

    assert_eq!(receipt.transaction.tx_type(), TransactionType::Internal);
    assert_eq!(
        receipt.transaction.sender,
        Some(address!("00000000000000000000000000000000000a4b05"))
    );
    assert_eq!(
        receipt.transaction.receiver,
        Some(address!("0000000000000000000000000000000000000064"))
    );
    assert!(!receipt.transaction.is_signed());
    assert_eq!(receipt.transaction.chain_id, Some(42161));
    assert_eq!(receipt.status, ReceiptStatus::Success);
    assert_eq!(receipt.block_number, 0x8d2a4f1);
    assert_eq!(
        receipt.txn_hash,
        "0x3a2f0c6e1b9d8a7f6e5d4c3b2a1908f7e6d5c4b3a291807f6e5d4c3b2a190807"
    );
    assert_eq!(receipt.total_fees_paid(), U256::ZERO);
}

#[test]
fn test_dynamic_receipt() {
    let receipt = decode(RpcFixtures::dynamic_receipt()).unwrap();

    assert_eq!(receipt.transaction.tx_type(), TransactionType::Dynamic);
    assert_eq!(receipt.transaction.max_fee(), Some(20_000_000));
    assert!(receipt.transaction.is_signed());
    assert_eq!(receipt.gas_price, 10_000_000);
    assert_eq!(receipt.gas_used, 0xb411);
    assert_eq!(receipt.gas_limit, 100_000);
    assert_eq!(receipt.contract_address, None);
    assert_eq!(receipt.logs.len(), 1);
    assert_eq!(receipt.logs[0].topics.len(), 3);
    assert_eq!(receipt.logs[0].log_index, Some(3));
    assert!(!receipt.failed());
}

#[test]
fn test_legacy_receipt_ran_out_of_gas() {
    let receipt = decode(RpcFixtures::legacy_receipt()).unwrap();

    assert_eq!(receipt.transaction.tx_type(), TransactionType::Static);
    assert_eq!(receipt.status, ReceiptStatus::Failure);
    assert!(receipt.ran_out_of_gas());
    assert!(receipt.transaction.data.is_empty());
    assert_eq!(
        receipt.total_fees_paid(),
        U256::from(21_000u64 * 100_000_000u64)
    );
}

#[test]
fn test_missing_block_number() {
    let mut raw = RpcFixtures::dynamic_receipt();
    raw.as_object_mut().unwrap().remove("blockNumber");
    assert_eq!(decode(raw).unwrap_err(), EcosystemError::MissingBlockNumber);

    let err = decode(json!({ "blockNumber": null, "hash": "0x01" })).unwrap_err();
    assert_eq!(err, EcosystemError::MissingBlockNumber);
}

#[test]
fn test_hash_aliases() {
    for key in ["hash", "txHash", "txnHash", "transactionHash", "transaction_hash", "txn_hash"] {
        let receipt = decode(json!({ "blockNumber": 1, key: "0xAbCd" })).unwrap();
        assert_eq!(receipt.txn_hash, "0xabcd", "{key}");
    }
}

#[test]
fn test_gas_price_aliases() {
    for key in ["gas_price", "gasPrice", "effective_gas_price", "effectiveGasPrice"] {
        let receipt = decode(json!({
            "blockNumber": 1,
            "hash": "0x01",
            "gasUsed": 21000,
            key: "0x3b9aca00",
        }))
        .unwrap();
        assert_eq!(receipt.gas_price, 1_000_000_000, "{key}");
        assert_eq!(
            receipt.total_fees_paid(),
            U256::from(21_000u64 * 1_000_000_000u64),
            "{key}"
        );
    }
}

#[test]
fn test_contract_address_aliases() {
    for key in ["contract_address", "contractAddress"] {
        let receipt = decode(json!({
            "blockNumber": 1,
            "hash": "0x01",
            key: RpcFixtures::RECEIVER,
        }))
        .unwrap();
        assert_eq!(
            receipt.contract_address,
            Some(address!("1e59ce931b4cfea3fe4b875411e280e173cb7a9c")),
            "{key}"
        );
    }

    let receipt = decode(json!({ "blockNumber": 1, "hash": "0x01", "contractAddress": null })).unwrap();
    assert_eq!(receipt.contract_address, None);
}

#[test]
fn test_gas_limit_falls_back_to_connection() {
    let arbitrum = Arbitrum::default();
    let connection = arbitrum.connect("local", None).unwrap();
    let raw = json!({
        "blockNumber": 1,
        "hash": "0x01",
        "status": 0,
        "gasUsed": 30_000_000,
    });

    let receipt = arbitrum
        .decode_receipt(RawFields::from_value(raw).unwrap(), Some(&connection))
        .unwrap();
    assert_eq!(receipt.transaction.gas_limit, Some(30_000_000));
    assert_eq!(receipt.gas_limit, 30_000_000);
    assert!(receipt.ran_out_of_gas());
}

#[test]
fn test_hash_from_bytes() {
    let receipt = decode(json!({ "blockNumber": 1, "hash": [0xab, 0xcd] })).unwrap();
    assert_eq!(receipt.txn_hash, "0xabcd");
}

#[test]
fn test_receipt_defaults() {
    let receipt = decode(json!({ "blockNumber": 1, "hash": "0x01" })).unwrap();
    assert_eq!(receipt.gas_used, 0);
    assert_eq!(receipt.gas_limit, 0);
    assert_eq!(receipt.gas_price, 0);
    assert_eq!(receipt.status, ReceiptStatus::Unknown);
    assert!(receipt.logs.is_empty());
}

#[test]
fn test_receipt_embeds_built_transaction() {
    let arbitrum = Arbitrum::default();
    let connection = arbitrum.connect("sepolia", None).unwrap();
    let tx = arbitrum
        .create_transaction(RpcFixtures::dynamic_request(), Some(&connection))
        .unwrap();

    let raw = tx
        .to_fields()
        .with("blockNumber", "0x10")
        .with("transactionHash", "0x01")
        .with("status", "0x1")
        .with("gasUsed", "0x5208")
        .with("effectiveGasPrice", "0x989680");

    let receipt = arbitrum.decode_receipt(raw, Some(&connection)).unwrap();
    assert_eq!(receipt.transaction, tx);
    assert_eq!(receipt.required_confirmations(), 1);
}

#[test]
fn test_receipt_uses_connection_defaults() {
    let arbitrum = Arbitrum::default();
    let connection = arbitrum.connect("mainnet", None).unwrap();
    let receipt = arbitrum
        .decode_receipt(
            RawFields::from_value(json!({ "blockNumber": 1, "hash": "0x01" })).unwrap(),
            Some(&connection),
        )
        .unwrap();
    assert_eq!(receipt.transaction.chain_id, Some(42161));
    assert_eq!(receipt.required_confirmations(), 1);
}

#[test]
fn test_receipt_unsupported_type() {
    let err = decode(json!({ "blockNumber": 1, "hash": "0x01", "type": "0x64" })).unwrap_err();
    assert!(matches!(err, EcosystemError::UnsupportedTransactionType { .. }));
}
