//! Arbitrum transaction records and the builder that normalizes them

use std::fmt;

use alloy::eips::eip2930::AccessList;
use alloy::primitives::{Address, Bytes, B256, U256};
use ecosystem_traits::fields::{
    quantity_hex, to_address, to_b256, to_bytes, to_u128, to_u256, to_u64,
};
use ecosystem_traits::{ActiveConnection, EcosystemError, FieldAliases, RawFields, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::aliases::{self, TRANSACTION_FIELDS};
use crate::config::ArbitrumConfig;

/// Transaction type tag, as carried in the EIP-2718 envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "u8")]
pub enum TransactionType {
    /// Legacy transaction with a single gas price
    #[default]
    Static,
    /// EIP-2930 transaction carrying an access list
    AccessList,
    /// EIP-1559 transaction with base and priority fees
    Dynamic,
    /// Arbitrum internal transaction, emitted by the chain itself
    Internal,
}

impl TransactionType {
    /// Tag of the Arbitrum internal transaction type
    pub const INTERNAL_TAG: u8 = 0x6a;

    /// Canonical integer tag
    pub fn tag(&self) -> u8 {
        match self {
            TransactionType::Static => 0x00,
            TransactionType::AccessList => 0x01,
            TransactionType::Dynamic => 0x02,
            TransactionType::Internal => Self::INTERNAL_TAG,
        }
    }

    /// Maps an integer tag to a type
    pub fn from_tag(tag: u64) -> Option<Self> {
        match tag {
            0x00 => Some(TransactionType::Static),
            0x01 => Some(TransactionType::AccessList),
            0x02 => Some(TransactionType::Dynamic),
            t if t == u64::from(Self::INTERNAL_TAG) => Some(TransactionType::Internal),
            _ => None,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase().replace('-', "_");
        let name = name.strip_prefix("transactiontype.").unwrap_or(&name);
        match name {
            "static" | "legacy" => Some(TransactionType::Static),
            "access_list" | "accesslist" => Some(TransactionType::AccessList),
            "dynamic" => Some(TransactionType::Dynamic),
            "internal" => Some(TransactionType::Internal),
            _ => None,
        }
    }

    /// Normalizes an explicit type: integers, hex strings (with or without
    /// `0x`), single-byte arrays, and enum-like names all map to the same
    /// tag. Strings are always read as hex, so `"6a"` is INTERNAL.
    pub fn from_value(value: &Value) -> Result<Self> {
        let unsupported = || EcosystemError::unsupported_type(display_value(value));

        let tag = match value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => {
                let s = s.trim();
                if let Some(kind) = Self::from_name(s) {
                    return Ok(kind);
                }
                match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                    Some("") => Some(0),
                    Some(digits) => u64::from_str_radix(digits, 16).ok(),
                    None if s.is_empty() => None,
                    None => u64::from_str_radix(s, 16).ok(),
                }
            }
            Value::Array(_) => to_bytes("type", value).ok().and_then(|bytes| {
                (!bytes.is_empty() && bytes.len() <= 8).then(|| {
                    bytes
                        .iter()
                        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte))
                })
            }),
            _ => None,
        };

        tag.and_then(Self::from_tag).ok_or_else(unsupported)
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl TryFrom<Value> for TransactionType {
    type Error = EcosystemError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(&value)
    }
}

impl From<TransactionType> for u8 {
    fn from(kind: TransactionType) -> Self {
        kind.tag()
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionType::Static => "STATIC",
            TransactionType::AccessList => "ACCESS_LIST",
            TransactionType::Dynamic => "DYNAMIC",
            TransactionType::Internal => "INTERNAL",
        };
        write!(f, "{name} ({:#04x})", self.tag())
    }
}

/// Combined `(v, r, s)` signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionSignature {
    /// Recovery id (or EIP-155 `v`)
    pub v: u64,
    /// Signature r
    pub r: B256,
    /// Signature s
    pub s: B256,
}

impl TransactionSignature {
    /// Nodes report unsigned transactions with zeroed components
    pub fn is_zero(&self) -> bool {
        self.v == 0 && self.r.is_zero() && self.s.is_zero()
    }
}

/// Fee fields, one shape per transaction type
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionFees {
    /// Legacy pricing
    Static {
        /// Gas price in wei
        gas_price: Option<u128>,
    },
    /// Legacy pricing plus an access list
    AccessList {
        /// Gas price in wei
        gas_price: Option<u128>,
        /// Pre-declared storage access
        access_list: AccessList,
    },
    /// Fee-market pricing
    Dynamic {
        /// Max total fee per gas in wei
        max_fee: Option<u128>,
        /// Max priority fee per gas in wei
        max_priority_fee: Option<u128>,
        /// Pre-declared storage access
        access_list: AccessList,
    },
    /// Internal transactions pay no fees
    Internal,
}

impl TransactionFees {
    /// Type implied by the fee shape
    pub fn tx_type(&self) -> TransactionType {
        match self {
            TransactionFees::Static { .. } => TransactionType::Static,
            TransactionFees::AccessList { .. } => TransactionType::AccessList,
            TransactionFees::Dynamic { .. } => TransactionType::Dynamic,
            TransactionFees::Internal => TransactionType::Internal,
        }
    }
}

/// A normalized Arbitrum transaction
#[derive(Debug, Clone, PartialEq)]
pub struct ArbitrumTransaction {
    /// Chain ID
    pub chain_id: Option<u64>,
    /// Sender nonce
    pub nonce: Option<u64>,
    /// Sender address
    pub sender: Option<Address>,
    /// Receiver address; `None` for contract creation
    pub receiver: Option<Address>,
    /// Value in wei
    pub value: U256,
    /// Gas limit
    pub gas_limit: Option<u64>,
    /// Call data, empty when none was given
    pub data: Bytes,
    /// Signature, when all three components were given
    pub signature: Option<TransactionSignature>,
    /// Confirmations required before the transaction counts as final
    pub required_confirmations: u64,
    /// Type-specific fee fields
    pub fees: TransactionFees,
}

impl ArbitrumTransaction {
    /// Transaction type
    pub fn tx_type(&self) -> TransactionType {
        self.fees.tx_type()
    }

    /// Legacy gas price, for the types that carry one
    pub fn gas_price(&self) -> Option<u128> {
        match &self.fees {
            TransactionFees::Static { gas_price } | TransactionFees::AccessList { gas_price, .. } => {
                *gas_price
            }
            _ => None,
        }
    }

    /// Max fee per gas, for dynamic-fee transactions
    pub fn max_fee(&self) -> Option<u128> {
        match &self.fees {
            TransactionFees::Dynamic { max_fee, .. } => *max_fee,
            _ => None,
        }
    }

    /// Max priority fee per gas, for dynamic-fee transactions
    pub fn max_priority_fee(&self) -> Option<u128> {
        match &self.fees {
            TransactionFees::Dynamic {
                max_priority_fee, ..
            } => *max_priority_fee,
            _ => None,
        }
    }

    /// Access list, for the types that carry one
    pub fn access_list(&self) -> Option<&AccessList> {
        match &self.fees {
            TransactionFees::AccessList { access_list, .. }
            | TransactionFees::Dynamic { access_list, .. } => Some(access_list),
            _ => None,
        }
    }

    /// Returns true if the transaction carries a signature
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Renders the transaction as RPC-style fields. Building from the
    /// result yields an identical transaction.
    pub fn to_fields(&self) -> RawFields {
        let mut fields = RawFields::new()
            .with("type", quantity_hex(U256::from(self.tx_type().tag())))
            .with("value", quantity_hex(self.value))
            .with("data", json!(self.data))
            .with("requiredConfirmations", self.required_confirmations);

        if let Some(chain_id) = self.chain_id {
            fields.insert("chainId", quantity_hex(U256::from(chain_id)));
        }
        if let Some(nonce) = self.nonce {
            fields.insert("nonce", quantity_hex(U256::from(nonce)));
        }
        if let Some(sender) = self.sender {
            fields.insert("from", json!(sender));
        }
        if let Some(receiver) = self.receiver {
            fields.insert("to", json!(receiver));
        }
        if let Some(gas_limit) = self.gas_limit {
            fields.insert("gas", quantity_hex(U256::from(gas_limit)));
        }
        if let Some(gas_price) = self.gas_price() {
            fields.insert("gasPrice", quantity_hex(U256::from(gas_price)));
        }
        if let Some(max_fee) = self.max_fee() {
            fields.insert("maxFeePerGas", quantity_hex(U256::from(max_fee)));
        }
        if let Some(max_priority_fee) = self.max_priority_fee() {
            fields.insert(
                "maxPriorityFeePerGas",
                quantity_hex(U256::from(max_priority_fee)),
            );
        }
        if let Some(access_list) = self.access_list() {
            fields.insert("accessList", json!(access_list));
        }
        if let Some(signature) = &self.signature {
            fields.insert("v", quantity_hex(U256::from(signature.v)));
            fields.insert("r", json!(signature.r));
            fields.insert("s", json!(signature.s));
        }
        fields
    }
}

fn take_with<T>(
    fields: &mut RawFields,
    field: &FieldAliases,
    coerce: impl Fn(&str, &Value) -> Result<T>,
) -> Result<Option<T>> {
    fields
        .take(field)
        .map(|value| coerce(field.canonical, &value))
        .transpose()
}

fn reject_foreign(field: &FieldAliases, present: bool, kind: TransactionType) -> Result<()> {
    if present {
        return Err(EcosystemError::validation(
            field.canonical,
            format!("not valid for {kind} transactions"),
        ));
    }
    Ok(())
}

fn to_access_list(field: &str, value: &Value) -> Result<AccessList> {
    serde_json::from_value(value.clone())
        .map_err(|e| EcosystemError::validation(field, format!("invalid access list: {e}")))
}

/// Normalizes open field mappings into [`ArbitrumTransaction`]s.
///
/// Defaults come from the explicit connection snapshot and from the
/// ecosystem configuration, never from ambient state.
#[derive(Debug, Clone, Copy)]
pub struct TransactionBuilder<'a> {
    config: &'a ArbitrumConfig,
    connection: Option<&'a ActiveConnection>,
}

impl<'a> TransactionBuilder<'a> {
    /// Creates a builder reading defaults from `config` and `connection`
    pub fn new(config: &'a ArbitrumConfig, connection: Option<&'a ActiveConnection>) -> Self {
        Self { config, connection }
    }

    /// Type used when neither an explicit tag nor a fee field decides it
    pub fn default_type(&self) -> TransactionType {
        let network = self
            .connection
            .map(|connection| connection.network.as_str())
            .unwrap_or(self.config.default_network.as_str());
        self.config
            .network_config(network)
            .map(|network| network.default_transaction_type)
            .unwrap_or_default()
    }

    /// Builds a transaction. Keys no alias claims are ignored.
    pub fn build(&self, mut fields: RawFields) -> Result<ArbitrumTransaction> {
        let ignored = fields.unclaimed(&[TRANSACTION_FIELDS]);
        if !ignored.is_empty() {
            tracing::trace!(?ignored, "ignoring fields unknown to the transaction builder");
        }

        let explicit_type = fields
            .take(&aliases::TYPE)
            .map(|value| TransactionType::from_value(&value))
            .transpose()?;

        let chain_id = take_with(&mut fields, &aliases::CHAIN_ID, to_u64)?;
        let nonce = take_with(&mut fields, &aliases::NONCE, to_u64)?;
        let sender = take_with(&mut fields, &aliases::SENDER, to_address)?;
        let receiver = take_with(&mut fields, &aliases::RECEIVER, to_address)?;
        let value = take_with(&mut fields, &aliases::VALUE, to_u256)?.unwrap_or_default();
        let gas_limit = take_with(&mut fields, &aliases::GAS_LIMIT, to_u64)?;
        let gas_price = take_with(&mut fields, &aliases::GAS_PRICE, to_u128)?;
        let max_fee = take_with(&mut fields, &aliases::MAX_FEE, to_u128)?;
        let max_priority_fee = take_with(&mut fields, &aliases::MAX_PRIORITY_FEE, to_u128)?;
        let access_list = take_with(&mut fields, &aliases::ACCESS_LIST, to_access_list)?;
        let data = take_with(&mut fields, &aliases::DATA, to_bytes)?.unwrap_or_default();
        let required_confirmations =
            take_with(&mut fields, &aliases::REQUIRED_CONFIRMATIONS, to_u64)?;
        let mut signature = self.assemble_signature(&mut fields)?;

        let tx_type = match explicit_type {
            Some(kind) => kind,
            None => {
                let inferred = if gas_price.is_some() {
                    TransactionType::Static
                } else if max_fee.is_some() || max_priority_fee.is_some() {
                    TransactionType::Dynamic
                } else if access_list.is_some() {
                    TransactionType::AccessList
                } else {
                    self.default_type()
                };
                tracing::debug!(%inferred, "inferred transaction type");
                inferred
            }
        };

        let fees = match tx_type {
            TransactionType::Static => {
                reject_foreign(&aliases::MAX_FEE, max_fee.is_some(), tx_type)?;
                reject_foreign(&aliases::MAX_PRIORITY_FEE, max_priority_fee.is_some(), tx_type)?;
                reject_foreign(&aliases::ACCESS_LIST, access_list.is_some(), tx_type)?;
                TransactionFees::Static { gas_price }
            }
            TransactionType::AccessList => {
                reject_foreign(&aliases::MAX_FEE, max_fee.is_some(), tx_type)?;
                reject_foreign(&aliases::MAX_PRIORITY_FEE, max_priority_fee.is_some(), tx_type)?;
                TransactionFees::AccessList {
                    gas_price,
                    access_list: access_list.unwrap_or_default(),
                }
            }
            TransactionType::Dynamic => {
                if let Some(gas_price) = gas_price {
                    tracing::debug!(
                        gas_price = %gas_price,
                        "discarding effective gas price on dynamic-fee transaction"
                    );
                }
                TransactionFees::Dynamic {
                    max_fee,
                    max_priority_fee,
                    access_list: access_list.unwrap_or_default(),
                }
            }
            TransactionType::Internal => {
                if gas_price.is_some()
                    || max_fee.is_some()
                    || max_priority_fee.is_some()
                    || access_list.is_some()
                {
                    tracing::debug!("ignoring fee fields on internal transaction");
                }
                if let Some(sig) = signature {
                    if !sig.is_zero() {
                        return Err(EcosystemError::validation(
                            "signature",
                            "internal transactions are not signed",
                        ));
                    }
                    signature = None;
                }
                TransactionFees::Internal
            }
        };

        let required_confirmations = required_confirmations.unwrap_or_else(|| {
            self.connection
                .map(|connection| connection.required_confirmations)
                .unwrap_or(0)
        });
        let chain_id = chain_id.or_else(|| self.connection.and_then(|c| c.chain_id));
        let gas_limit = gas_limit.or_else(|| self.connection.and_then(|c| c.gas_limit.exact()));

        Ok(ArbitrumTransaction {
            chain_id,
            nonce,
            sender,
            receiver,
            value,
            gas_limit,
            data,
            signature,
            required_confirmations,
            fees,
        })
    }

    /// Combines `v`, `r`, `s` when all three are present. Partial
    /// signatures are dropped without error.
    fn assemble_signature(&self, fields: &mut RawFields) -> Result<Option<TransactionSignature>> {
        let v = fields.take(&aliases::SIG_V);
        let r = fields.take(&aliases::SIG_R);
        let s = fields.take(&aliases::SIG_S);

        match (v, r, s) {
            (Some(v), Some(r), Some(s)) => Ok(Some(TransactionSignature {
                v: to_u64("v", &v)?,
                r: to_b256("r", &r)?,
                s: to_b256("s", &s)?,
            })),
            _ => Ok(None),
        }
    }
}
