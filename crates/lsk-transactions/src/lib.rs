//! # lsk-transactions
//!
//! The canonical transaction entity and its pure protocol behavior.
//!
//! This crate provides:
//! - [`Transaction`] - the immutable protocol record, normalized from raw
//!   wire input ([`RawTransaction`])
//! - [`codec::encode_transaction`] - the canonical byte encoding underlying
//!   signing and transaction identity
//! - structural validation, state verification and cross-transaction
//!   conflict checks, all reported as values rather than thrown
//! - pure balance effects ([`Transaction::apply_to`] /
//!   [`Transaction::undo_to`]) on [`Account`] snapshots

#![warn(missing_docs)]
#![warn(clippy::all)]

mod account;
mod block;
mod checks;
pub mod codec;
mod effects;
mod error;
mod transaction;

pub use account::Account;
pub use block::Block;
pub use checks::{ValidationOutcome, VerificationOutcome};
pub use error::{NormalizeError, TransactionError, TransactionErrorKind};
pub use transaction::{
    parse_transaction, RawTransaction, RequiredAttributes, Transaction, TransactionType,
};
