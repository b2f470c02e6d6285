//! # Arbitrum Ecosystem
//!
//! Arbitrum support for EVM ecosystem hosts.
//!
//! Arbitrum is an Optimistic Rollup Layer 2 for Ethereum. Besides the usual
//! legacy, access-list and dynamic-fee transactions, its nodes report
//! internal transactions (type `0x6a`) that the chain emits itself.
//!
//! This crate contributes:
//! - the `mainnet`, `goerli` and `sepolia` networks, their forks and `local`
//! - a transaction builder tolerant of the field spellings nodes and
//!   callers use (`gas`/`gasLimit`, `input`/`data`, ...)
//! - a receipt decoder that embeds the normalized transaction
//!
//! ## Example
//!
//! ```rust,ignore
//! use arbitrum_ecosystem::{Arbitrum, TransactionType};
//! use ecosystem_traits::{Ecosystem, RawFields};
//!
//! let arbitrum = Arbitrum::default();
//! let connection = arbitrum.connect("sepolia", None)?;
//!
//! let tx = arbitrum.create_transaction(
//!     RawFields::new().with("maxFeePerGas", "0x3b9aca00"),
//!     Some(&connection),
//! )?;
//! assert_eq!(tx.tx_type(), TransactionType::Dynamic);
//! assert_eq!(tx.chain_id, Some(421614));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod aliases;
mod config;
mod ecosystem;
mod networks;
mod receipt;
mod transaction;

pub use config::*;
pub use ecosystem::*;
pub use networks::*;
pub use receipt::*;
pub use transaction::*;
