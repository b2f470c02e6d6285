//! Configuration loading tests

use std::io::Write;

use arbitrum_ecosystem::{Arbitrum, ArbitrumConfig, TransactionType, LOCAL_GAS_LIMIT};
use ecosystem_traits::{Ecosystem, EcosystemError, ErrorCode, GasLimit};
use serde_json::json;

#[test]
fn test_local_gas_limit() {
    let arbitrum = Arbitrum::default();
    assert_eq!(
        arbitrum.config().local.gas_limit,
        GasLimit::Exact(LOCAL_GAS_LIMIT)
    );
    assert_eq!(LOCAL_GAS_LIMIT, 30_000_000);
}

#[test]
fn test_default_transaction_type() {
    let arbitrum = Arbitrum::default();
    assert_eq!(
        arbitrum.config().mainnet.default_transaction_type,
        TransactionType::Static
    );
}

#[test]
fn test_mainnet_fork_not_configured() {
    let config = ArbitrumConfig::from_json_value(json!({})).unwrap();
    assert_eq!(config.mainnet_fork.required_confirmations, 0);
}

#[test]
fn test_mainnet_fork_configured() {
    let config = ArbitrumConfig::from_json_value(json!({
        "mainnet_fork": { "required_confirmations": 555 }
    }))
    .unwrap();
    assert_eq!(config.mainnet_fork.required_confirmations, 555);
    assert_eq!(
        config.network_config("mainnet-fork").unwrap().required_confirmations,
        555
    );
}

#[test]
fn test_custom_network() {
    let config = ArbitrumConfig::from_json_value(json!({
        "apenet": { "required_confirmations": 333 }
    }))
    .unwrap();
    assert_eq!(config.custom["apenet"].required_confirmations, 333);
    assert_eq!(
        config.network_config("apenet").unwrap().required_confirmations,
        333
    );
}

#[test]
fn test_gas_limit_spellings() {
    let config = ArbitrumConfig::from_json_value(json!({
        "mainnet": { "gas_limit": "max" },
        "goerli": { "gas_limit": "0x5208" },
        "local": { "gas_limit": "auto" }
    }))
    .unwrap();
    assert_eq!(config.mainnet.gas_limit, GasLimit::Max);
    assert_eq!(config.goerli.gas_limit, GasLimit::Exact(21000));
    assert_eq!(config.local.gas_limit, GasLimit::Auto);
}

#[test]
fn test_default_provider_override() {
    let config = ArbitrumConfig::from_json_value(json!({
        "sepolia": { "default_provider": "alchemy" }
    }))
    .unwrap();
    let arbitrum = Arbitrum::new(config);
    assert_eq!(
        arbitrum.default_provider("sepolia").as_deref(),
        Some("alchemy")
    );
    assert_eq!(
        arbitrum.default_provider("local").as_deref(),
        Some("test")
    );
}

#[test]
fn test_default_network_override() {
    let config = ArbitrumConfig::from_json_value(json!({ "default_network": "local" })).unwrap();
    let arbitrum = Arbitrum::new(config);
    assert_eq!(arbitrum.default_network(), "local");
    assert!(arbitrum.network_tree().contains("└── local  (default)"));
}

#[test]
fn test_invalid_value() {
    let err = ArbitrumConfig::from_json_value(json!({
        "mainnet": { "required_confirmations": "many" }
    }))
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Config);
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!(
        "arbitrum-config-{}.json",
        std::process::id()
    ));
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, r#"{{ "local": {{ "required_confirmations": 2 }} }}"#).unwrap();
    drop(file);

    let config = ArbitrumConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.local.required_confirmations, 2);
    assert_eq!(config.local.gas_limit, GasLimit::Exact(LOCAL_GAS_LIMIT));
}

#[test]
fn test_load_missing_file() {
    let err = ArbitrumConfig::load("/nonexistent/arbitrum.json").unwrap_err();
    assert!(matches!(err, EcosystemError::External { .. }));
}
