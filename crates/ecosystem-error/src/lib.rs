//! # Ecosystem Error
//!
//! Unified error types for EVM ecosystem plugins. Every operation an
//! ecosystem exposes is synchronous and all-or-nothing, so a failure is
//! reported straight to the caller with the offending field or value named.
//!
//! ## Error Categories
//!
//! - [`EcosystemError::UnsupportedTransactionType`] - explicit type tag outside the known set
//! - [`EcosystemError::Validation`] - malformed or shape-foreign field
//! - [`EcosystemError::MissingBlockNumber`] - receipt without a block number
//! - [`EcosystemError::UnknownNetwork`] - network lookup failures
//!
//! ## Example
//!
//! ```
//! use ecosystem_error::{EcosystemError, Result};
//!
//! fn parse_nonce(raw: &str) -> Result<u64> {
//!     raw.parse().map_err(|_| EcosystemError::Validation {
//!         field: "nonce".to_string(),
//!         reason: format!("'{raw}' is not an integer"),
//!     })
//! }
//!
//! assert!(parse_nonce("7").is_ok());
//! assert!(parse_nonce("seven").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use thiserror::Error;

/// The main error type for ecosystem operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcosystemError {
    // ============ Transaction Errors ============
    /// Explicit transaction type tag is not one the ecosystem knows
    #[error("Transaction type '{value}' is not supported")]
    UnsupportedTransactionType {
        /// The offending type value, as given by the caller
        value: String,
    },

    /// Field is malformed or not valid for the selected record shape
    #[error("Invalid field '{field}': {reason}")]
    Validation {
        /// Canonical name of the field
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// A field the record cannot exist without is absent
    #[error("Missing required field: {0}")]
    MissingField(String),

    // ============ Receipt Errors ============
    /// Receipt carries no block number under any known alias
    #[error("Receipt is missing a block number")]
    MissingBlockNumber,

    // ============ Network Errors ============
    /// Network is not registered for the ecosystem
    #[error("Network '{network}' is not registered for ecosystem '{ecosystem}'")]
    UnknownNetwork {
        /// Ecosystem name
        ecosystem: String,
        /// Requested network name
        network: String,
    },

    /// Provider is not registered for the network
    #[error("Provider '{provider}' is not registered for network '{network}'")]
    UnknownProvider {
        /// Network name
        network: String,
        /// Requested provider name
        provider: String,
    },

    // ============ IO Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// JSON parse error
    #[error("JSON error: {0}")]
    JsonError(String),

    // ============ Generic ============
    /// Wrapped error from external source
    #[error("External error: {message}")]
    External {
        /// Error message
        message: String,
    },
}

impl EcosystemError {
    /// Shorthand for a [`EcosystemError::Validation`] error
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        EcosystemError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for an [`EcosystemError::UnsupportedTransactionType`] error
    pub fn unsupported_type(value: impl Into<String>) -> Self {
        EcosystemError::UnsupportedTransactionType {
            value: value.into(),
        }
    }
}

/// Convenient Result type using EcosystemError
pub type Result<T> = std::result::Result<T, EcosystemError>;

/// Extension trait for adding context to errors
pub trait ErrorContext<T> {
    /// Adds context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;

    /// Adds context using a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: std::error::Error> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| EcosystemError::External {
            message: format!("{}: {}", ctx.into(), e),
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| EcosystemError::External {
            message: format!("{}: {}", f(), e),
        })
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| EcosystemError::MissingField(ctx.into()))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.ok_or_else(|| EcosystemError::MissingField(f()))
    }
}

// ============ From implementations for common error types ============

impl From<std::io::Error> for EcosystemError {
    fn from(err: std::io::Error) -> Self {
        EcosystemError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for EcosystemError {
    fn from(err: serde_json::Error) -> Self {
        EcosystemError::JsonError(err.to_string())
    }
}

impl From<hex::FromHexError> for EcosystemError {
    fn from(err: hex::FromHexError) -> Self {
        EcosystemError::validation("hex", err.to_string())
    }
}

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum ErrorCode {
    /// Unknown error
    Unknown = 0,
    /// Unsupported transaction type
    UnsupportedTransactionType = 3001,
    /// Field validation failed
    Validation = 3002,
    /// Required field missing
    MissingField = 3003,
    /// Receipt block number missing
    MissingBlockNumber = 3101,
    /// Unknown network
    UnknownNetwork = 4001,
    /// Unknown provider
    UnknownProvider = 4002,
    /// Configuration error
    Config = 7001,
}

impl EcosystemError {
    /// Returns the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            EcosystemError::UnsupportedTransactionType { .. } => {
                ErrorCode::UnsupportedTransactionType
            }
            EcosystemError::Validation { .. } => ErrorCode::Validation,
            EcosystemError::MissingField(_) => ErrorCode::MissingField,
            EcosystemError::MissingBlockNumber => ErrorCode::MissingBlockNumber,
            EcosystemError::UnknownNetwork { .. } => ErrorCode::UnknownNetwork,
            EcosystemError::UnknownProvider { .. } => ErrorCode::UnknownProvider,
            EcosystemError::ConfigError(_) | EcosystemError::JsonError(_) => ErrorCode::Config,
            _ => ErrorCode::Unknown,
        }
    }

    /// Returns the canonical field name an error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            EcosystemError::Validation { field, .. } => Some(field),
            EcosystemError::MissingField(field) => Some(field),
            EcosystemError::MissingBlockNumber => Some("block_number"),
            EcosystemError::UnsupportedTransactionType { .. } => Some("type"),
            _ => None,
        }
    }
}
