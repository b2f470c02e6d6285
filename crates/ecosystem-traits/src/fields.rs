//! Open field mappings and the alias tables used to normalize them.
//!
//! Callers hand transactions and receipts to an ecosystem as loosely-typed
//! JSON objects. The same logical field can arrive under several names
//! (`gas`, `gas_limit`, `gasLimit`), so every canonical field is described by
//! a [`FieldAliases`] entry and resolved through [`RawFields::take`].

use std::collections::BTreeSet;

use alloy::primitives::{Address, Bytes, B256, U256};
use ecosystem_error::{EcosystemError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered synonyms for one canonical field. The first alias present wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAliases {
    /// Canonical field name, used in error messages
    pub canonical: &'static str,
    /// Accepted spellings, highest priority first
    pub aliases: &'static [&'static str],
}

impl FieldAliases {
    /// Creates a new alias entry
    pub const fn new(canonical: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { canonical, aliases }
    }

    /// Returns true if `key` is one of the accepted spellings
    pub fn matches(&self, key: &str) -> bool {
        self.aliases.contains(&key)
    }
}

/// A loosely-typed field mapping, as produced by a caller or an RPC node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFields(Map<String, Value>);

impl RawFields {
    /// Creates an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mapping from a JSON value, which must be an object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(EcosystemError::validation(
                "fields",
                format!("expected a JSON object, got {}", json_kind(&other)),
            )),
        }
    }

    /// Parses a mapping from a JSON document
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(raw)?)
    }

    /// Sets a field, replacing any previous value under the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style [`RawFields::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Removes a single key
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Returns the raw value stored under `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns true if `key` is present, even with a null value
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no keys
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the first non-null value found under any alias, without removing it
    pub fn peek(&self, field: &FieldAliases) -> Option<&Value> {
        field
            .aliases
            .iter()
            .filter_map(|alias| self.0.get(*alias))
            .find(|value| !value.is_null())
    }

    /// Returns true if the field is present (non-null) under any alias
    pub fn has(&self, field: &FieldAliases) -> bool {
        self.peek(field).is_some()
    }

    /// Resolves a field: the first non-null alias wins, then every alias key
    /// of the field is removed. Conflicting aliases are never merged.
    pub fn take(&mut self, field: &FieldAliases) -> Option<Value> {
        let winner = field
            .aliases
            .iter()
            .find(|alias| self.0.get(**alias).is_some_and(|v| !v.is_null()))
            .copied();

        let value = winner.and_then(|alias| self.0.remove(alias));
        for alias in field.aliases {
            self.0.remove(*alias);
        }
        value
    }

    /// Keys not claimed by any of the given alias tables
    pub fn unclaimed<'a>(&'a self, tables: &[&[FieldAliases]]) -> BTreeSet<&'a str> {
        self.keys()
            .filter(|key| {
                !tables
                    .iter()
                    .flat_map(|table| table.iter())
                    .any(|field| field.matches(key))
            })
            .collect()
    }

    /// Unwraps into the underlying JSON object
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RawFields {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for RawFields {
    type Error = EcosystemError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl From<RawFields> for Value {
    fn from(fields: RawFields) -> Self {
        Value::Object(fields.0)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for RawFields {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn invalid(field: &str, value: &Value, expected: &str) -> EcosystemError {
    EcosystemError::validation(field, format!("expected {expected}, got {value}"))
}

fn strip_hex_prefix(s: &str) -> Option<&str> {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))
}

// ============================================================================
// Value coercion
// ============================================================================

/// Coerces a quantity: JSON integer, decimal string, or `0x` hex string.
pub fn to_u256(field: &str, value: &Value) -> Result<U256> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .map(U256::from)
            .ok_or_else(|| invalid(field, value, "a non-negative integer")),
        Value::String(s) => {
            let s = s.trim();
            let parsed = match strip_hex_prefix(s) {
                Some("") => Ok(U256::ZERO),
                Some(digits) => U256::from_str_radix(digits, 16),
                None if s.is_empty() => return Err(invalid(field, value, "a quantity")),
                None => U256::from_str_radix(s, 10),
            };
            parsed.map_err(|_| invalid(field, value, "a decimal or hex quantity"))
        }
        _ => Err(invalid(field, value, "a quantity")),
    }
}

/// Coerces a quantity that must fit into 64 bits.
pub fn to_u64(field: &str, value: &Value) -> Result<u64> {
    let wide = to_u256(field, value)?;
    u64::try_from(wide).map_err(|_| invalid(field, value, "a 64-bit quantity"))
}

/// Coerces a quantity that must fit into 128 bits.
pub fn to_u128(field: &str, value: &Value) -> Result<u128> {
    let wide = to_u256(field, value)?;
    u128::try_from(wide).map_err(|_| invalid(field, value, "a 128-bit quantity"))
}

/// Coerces a byte payload. `null` becomes empty bytes.
pub fn to_bytes(field: &str, value: &Value) -> Result<Bytes> {
    match value {
        Value::Null => Ok(Bytes::new()),
        Value::String(s) => {
            let digits = strip_hex_prefix(s.trim()).unwrap_or(s.trim());
            hex::decode(digits)
                .map(Bytes::from)
                .map_err(|e| EcosystemError::validation(field, e.to_string()))
        }
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_u64()
                    .and_then(|b| u8::try_from(b).ok())
                    .ok_or_else(|| invalid(field, item, "a byte"))
            })
            .collect::<Result<Vec<u8>>>()
            .map(Bytes::from),
        _ => Err(invalid(field, value, "hex-encoded bytes")),
    }
}

/// Coerces a 20-byte address.
pub fn to_address(field: &str, value: &Value) -> Result<Address> {
    match value {
        Value::String(s) => s
            .trim()
            .parse::<Address>()
            .map_err(|_| invalid(field, value, "a 20-byte address")),
        Value::Array(_) => {
            let bytes = to_bytes(field, value)?;
            if bytes.len() != 20 {
                return Err(invalid(field, value, "a 20-byte address"));
            }
            Ok(Address::from_slice(&bytes))
        }
        _ => Err(invalid(field, value, "a 20-byte address")),
    }
}

/// Coerces a 32-byte word, left-padding shorter inputs.
pub fn to_b256(field: &str, value: &Value) -> Result<B256> {
    let bytes = match value {
        Value::Number(_) => return to_u256(field, value).map(B256::from),
        Value::String(s) => {
            let digits = strip_hex_prefix(s.trim()).unwrap_or(s.trim());
            let padded = if digits.len() % 2 == 1 {
                format!("0{digits}")
            } else {
                digits.to_string()
            };
            hex::decode(padded).map_err(|e| EcosystemError::validation(field, e.to_string()))?
        }
        Value::Array(_) => to_bytes(field, value)?.to_vec(),
        _ => return Err(invalid(field, value, "a 32-byte word")),
    };

    if bytes.len() > 32 {
        return Err(invalid(field, value, "at most 32 bytes"));
    }
    let mut word = [0u8; 32];
    word[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(B256::from(word))
}

/// Renders hex-like input (string or byte array) as a lowercase `0x` string.
pub fn to_hex_string(field: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => {
            let digits = strip_hex_prefix(s.trim()).unwrap_or(s.trim());
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid(field, value, "a hex string"));
            }
            Ok(format!("0x{}", digits.to_ascii_lowercase()))
        }
        Value::Array(_) => {
            let bytes = to_bytes(field, value)?;
            Ok(format!("0x{}", hex::encode(bytes)))
        }
        _ => Err(invalid(field, value, "a hex string")),
    }
}

/// Coerces a status-like flag to an integer. Booleans map to 0 and 1.
pub fn to_flag(field: &str, value: &Value) -> Result<u64> {
    match value {
        Value::Bool(b) => Ok(u64::from(*b)),
        _ => to_u64(field, value),
    }
}

/// Renders a quantity the way RPC nodes do (`0x`-prefixed, no leading zeros).
pub fn quantity_hex(value: impl Into<U256>) -> Value {
    Value::String(format!("{:#x}", value.into()))
}
