//! Receipt decoding

use std::fmt;

use alloy::primitives::{Address, Bytes, B256, U256};
use ecosystem_traits::fields::{
    to_address, to_b256, to_bytes, to_flag, to_hex_string, to_u128, to_u64,
};
use ecosystem_traits::{
    ActiveConnection, EcosystemError, ErrorContext, FieldAliases, RawFields, Result,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aliases::{self, RECEIPT_FIELDS, TRANSACTION_FIELDS};
use crate::config::ArbitrumConfig;
use crate::transaction::{ArbitrumTransaction, TransactionBuilder};

/// Execution outcome reported by the node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    /// The node reported no status
    #[default]
    Unknown,
    /// Execution reverted
    Failure,
    /// Execution succeeded
    Success,
}

impl ReceiptStatus {
    /// Maps a status flag. Only 0 and 1 are meaningful.
    pub fn from_flag(flag: u64) -> Option<Self> {
        match flag {
            0 => Some(ReceiptStatus::Failure),
            1 => Some(ReceiptStatus::Success),
            _ => None,
        }
    }
}

impl fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiptStatus::Unknown => write!(f, "unknown"),
            ReceiptStatus::Failure => write!(f, "failure"),
            ReceiptStatus::Success => write!(f, "success"),
        }
    }
}

/// A log entry emitted while executing the transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLog {
    /// Emitting contract
    pub address: Address,
    /// Indexed topics
    pub topics: Vec<B256>,
    /// Unindexed data
    pub data: Bytes,
    /// Position of the log in the block
    pub log_index: Option<u64>,
}

impl ReceiptLog {
    fn decode(index: usize, value: &Value) -> Result<Self> {
        let field = format!("logs[{index}]");
        let mut entry = RawFields::from_value(value.clone())
            .map_err(|_| EcosystemError::validation(&field, "expected a JSON object"))?;

        let address_field = format!("{field}.address");
        let address = entry
            .take(&aliases::LOG_ADDRESS)
            .context(address_field.as_str())
            .and_then(|value| to_address(&address_field, &value))?;

        let topics_field = format!("{field}.topics");
        let topics = match entry.take(&aliases::LOG_TOPICS) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, topic)| to_b256(&format!("{topics_field}[{i}]"), topic))
                .collect::<Result<_>>()?,
            Some(other) => {
                return Err(EcosystemError::validation(
                    topics_field,
                    format!("expected an array, got {other}"),
                ))
            }
        };
        let data = entry
            .take(&aliases::LOG_DATA)
            .map(|value| to_bytes(&format!("{field}.data"), &value))
            .transpose()?
            .unwrap_or_default();
        let log_index = entry
            .take(&aliases::LOG_INDEX)
            .map(|value| to_u64(&format!("{field}.log_index"), &value))
            .transpose()?;

        Ok(Self {
            address,
            topics,
            data,
            log_index,
        })
    }
}

/// A decoded Arbitrum receipt
#[derive(Debug, Clone, PartialEq)]
pub struct ArbitrumReceipt {
    /// The transaction the receipt belongs to
    pub transaction: ArbitrumTransaction,
    /// Transaction hash, lowercase and `0x`-prefixed
    pub txn_hash: String,
    /// Execution outcome
    pub status: ReceiptStatus,
    /// Block the transaction was mined in
    pub block_number: u64,
    /// Gas consumed
    pub gas_used: u64,
    /// Gas limit of the transaction
    pub gas_limit: u64,
    /// Price paid per unit of gas, in wei
    pub gas_price: u128,
    /// Address of the contract the transaction created, if any
    pub contract_address: Option<Address>,
    /// Emitted logs
    pub logs: Vec<ReceiptLog>,
}

impl ArbitrumReceipt {
    /// Returns true if execution reverted
    pub fn failed(&self) -> bool {
        self.status == ReceiptStatus::Failure
    }

    /// Total fee paid, in wei
    pub fn total_fees_paid(&self) -> U256 {
        U256::from(self.gas_used) * U256::from(self.gas_price)
    }

    /// Returns true if the transaction failed after using all of its gas
    pub fn ran_out_of_gas(&self) -> bool {
        self.failed() && self.gas_limit > 0 && self.gas_used == self.gas_limit
    }

    /// Confirmations required before the transaction counts as final
    pub fn required_confirmations(&self) -> u64 {
        self.transaction.required_confirmations
    }
}

/// Decodes open field mappings into [`ArbitrumReceipt`]s
#[derive(Debug, Clone, Copy)]
pub struct ReceiptDecoder<'a> {
    builder: TransactionBuilder<'a>,
}

impl<'a> ReceiptDecoder<'a> {
    /// Creates a decoder reading defaults from `config` and `connection`
    pub fn new(config: &'a ArbitrumConfig, connection: Option<&'a ActiveConnection>) -> Self {
        Self {
            builder: TransactionBuilder::new(config, connection),
        }
    }

    /// Decodes a receipt. The whole mapping is handed to the transaction
    /// builder, so every transaction alias is understood here too.
    pub fn decode(&self, fields: RawFields) -> Result<ArbitrumReceipt> {
        let ignored = fields.unclaimed(&[TRANSACTION_FIELDS, RECEIPT_FIELDS]);
        if !ignored.is_empty() {
            tracing::trace!(?ignored, "ignoring fields unknown to the receipt decoder");
        }

        let block_number = fields
            .peek(&aliases::BLOCK_NUMBER)
            .ok_or(EcosystemError::MissingBlockNumber)
            .and_then(|value| to_u64(aliases::BLOCK_NUMBER.canonical, value))?;

        let status = match fields.peek(&aliases::STATUS) {
            None => ReceiptStatus::Unknown,
            Some(value) => {
                let flag = to_flag(aliases::STATUS.canonical, value)?;
                ReceiptStatus::from_flag(flag).ok_or_else(|| {
                    EcosystemError::validation(
                        aliases::STATUS.canonical,
                        format!("expected 0 or 1, got {flag}"),
                    )
                })?
            }
        };

        let txn_hash = fields
            .peek(&aliases::TXN_HASH)
            .context(aliases::TXN_HASH.canonical)
            .and_then(|value| to_hex_string(aliases::TXN_HASH.canonical, value))?;

        let gas_used = peek_with(&fields, &aliases::GAS_USED, to_u64)?.unwrap_or(0);
        let gas_limit = peek_with(&fields, &aliases::GAS_LIMIT, to_u64)?;
        let gas_price = peek_with(&fields, &aliases::RECEIPT_GAS_PRICE, to_u128)?.unwrap_or(0);
        let contract_address = peek_with(&fields, &aliases::CONTRACT_ADDRESS, to_address)?;

        let logs = match fields.peek(&aliases::LOGS) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => entries
                .iter()
                .enumerate()
                .map(|(index, entry)| ReceiptLog::decode(index, entry))
                .collect::<Result<_>>()?,
            Some(other) => {
                return Err(EcosystemError::validation(
                    aliases::LOGS.canonical,
                    format!("expected an array, got {other}"),
                ))
            }
        };

        let transaction = self.builder.build(fields)?;
        // A receipt without its own limit reports the one the transaction ran with
        let gas_limit = gas_limit.or(transaction.gas_limit).unwrap_or(0);

        tracing::debug!(
            txn_hash = %txn_hash,
            block_number,
            %status,
            tx_type = %transaction.tx_type(),
            "decoded receipt"
        );

        Ok(ArbitrumReceipt {
            transaction,
            txn_hash,
            status,
            block_number,
            gas_used,
            gas_limit,
            gas_price,
            contract_address,
            logs,
        })
    }
}

fn peek_with<T>(
    fields: &RawFields,
    field: &FieldAliases,
    coerce: impl Fn(&str, &Value) -> Result<T>,
) -> Result<Option<T>> {
    fields
        .peek(field)
        .map(|value| coerce(field.canonical, value))
        .transpose()
}
