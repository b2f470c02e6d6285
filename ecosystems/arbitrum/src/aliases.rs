//! Field alias tables for transactions and receipts

use ecosystem_traits::FieldAliases;

/// Explicit transaction type tag
pub const TYPE: FieldAliases = FieldAliases::new("type", &["type", "tx_type", "txType"]);
/// Chain ID
pub const CHAIN_ID: FieldAliases = FieldAliases::new("chain_id", &["chain_id", "chainId"]);
/// Sender nonce
pub const NONCE: FieldAliases = FieldAliases::new("nonce", &["nonce"]);
/// Sender address
pub const SENDER: FieldAliases = FieldAliases::new("sender", &["sender", "from"]);
/// Receiver address
pub const RECEIVER: FieldAliases = FieldAliases::new("receiver", &["receiver", "to"]);
/// Value in wei
pub const VALUE: FieldAliases = FieldAliases::new("value", &["value"]);
/// Gas limit
pub const GAS_LIMIT: FieldAliases = FieldAliases::new("gas_limit", &["gas", "gas_limit", "gasLimit"]);
/// Legacy gas price
pub const GAS_PRICE: FieldAliases = FieldAliases::new("gas_price", &["gas_price", "gasPrice"]);
/// Max fee per gas
pub const MAX_FEE: FieldAliases = FieldAliases::new(
    "max_fee",
    &["max_fee", "maxFee", "max_fee_per_gas", "maxFeePerGas"],
);
/// Max priority fee per gas
pub const MAX_PRIORITY_FEE: FieldAliases = FieldAliases::new(
    "max_priority_fee",
    &[
        "max_priority_fee",
        "maxPriorityFee",
        "max_priority_fee_per_gas",
        "maxPriorityFeePerGas",
    ],
);
/// EIP-2930 access list
pub const ACCESS_LIST: FieldAliases =
    FieldAliases::new("access_list", &["access_list", "accessList"]);
/// Call data
pub const DATA: FieldAliases = FieldAliases::new("data", &["data", "input"]);
/// Required confirmations
pub const REQUIRED_CONFIRMATIONS: FieldAliases = FieldAliases::new(
    "required_confirmations",
    &["required_confirmations", "requiredConfirmations"],
);
/// Signature recovery id
pub const SIG_V: FieldAliases = FieldAliases::new("v", &["v"]);
/// Signature r
pub const SIG_R: FieldAliases = FieldAliases::new("r", &["r"]);
/// Signature s
pub const SIG_S: FieldAliases = FieldAliases::new("s", &["s"]);

/// Every field the transaction builder claims
pub const TRANSACTION_FIELDS: &[FieldAliases] = &[
    TYPE,
    CHAIN_ID,
    NONCE,
    SENDER,
    RECEIVER,
    VALUE,
    GAS_LIMIT,
    GAS_PRICE,
    MAX_FEE,
    MAX_PRIORITY_FEE,
    ACCESS_LIST,
    DATA,
    REQUIRED_CONFIRMATIONS,
    SIG_V,
    SIG_R,
    SIG_S,
];

/// Block the receipt was mined in
pub const BLOCK_NUMBER: FieldAliases =
    FieldAliases::new("block_number", &["block_number", "blockNumber"]);
/// Execution status
pub const STATUS: FieldAliases = FieldAliases::new("status", &["status"]);
/// Transaction hash
pub const TXN_HASH: FieldAliases = FieldAliases::new(
    "txn_hash",
    &[
        "hash",
        "txHash",
        "txnHash",
        "transactionHash",
        "transaction_hash",
        "txn_hash",
    ],
);
/// Gas used
pub const GAS_USED: FieldAliases = FieldAliases::new("gas_used", &["gas_used", "gasUsed"]);
/// Price paid per unit of gas
pub const RECEIPT_GAS_PRICE: FieldAliases = FieldAliases::new(
    "gas_price",
    &["gas_price", "gasPrice", "effective_gas_price", "effectiveGasPrice"],
);
/// Address of a contract created by the transaction
pub const CONTRACT_ADDRESS: FieldAliases =
    FieldAliases::new("contract_address", &["contract_address", "contractAddress"]);
/// Emitted logs
pub const LOGS: FieldAliases = FieldAliases::new("logs", &["logs"]);

/// Every field the receipt decoder claims on top of the transaction fields
pub const RECEIPT_FIELDS: &[FieldAliases] = &[
    BLOCK_NUMBER,
    STATUS,
    TXN_HASH,
    GAS_USED,
    RECEIPT_GAS_PRICE,
    CONTRACT_ADDRESS,
    LOGS,
];

/// Emitting contract
pub const LOG_ADDRESS: FieldAliases = FieldAliases::new("logs.address", &["address"]);
/// Indexed topics
pub const LOG_TOPICS: FieldAliases = FieldAliases::new("logs.topics", &["topics"]);
/// Unindexed data
pub const LOG_DATA: FieldAliases = FieldAliases::new("logs.data", &["data"]);
/// Position of the log in the block
pub const LOG_INDEX: FieldAliases = FieldAliases::new("logs.log_index", &["log_index", "logIndex"]);
