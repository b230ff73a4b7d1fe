//! Transaction error types
//!
//! Recoverable failures are values ([`TransactionError`]) carried in result
//! records; only normalization of raw input can fail outright
//! ([`NormalizeError`]), because a transaction whose type cannot be
//! classified must never become a value.

use lsk_primitives::TransactionId;
use std::fmt;
use thiserror::Error;

/// Classification of a reported transaction failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionErrorKind {
    /// Local, stateless validation failure
    Structural,
    /// Sender balance cannot cover the transaction cost
    StateInsufficiency,
    /// Ledger state contradicts the transaction (e.g. key mismatch)
    StateConflict,
    /// Clash with another transaction already in the pool
    Conflict,
}

/// A transaction-level failure reported as a value
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionError {
    /// Failure classification
    pub kind: TransactionErrorKind,
    /// Human-readable message
    pub message: String,
    /// The transaction this error refers to, when known
    pub transaction_id: Option<TransactionId>,
}

impl TransactionError {
    fn new(kind: TransactionErrorKind, message: impl Into<String>) -> Self {
        TransactionError {
            kind,
            message: message.into(),
            transaction_id: None,
        }
    }

    /// Structural (validate-stage) error
    pub fn structural(message: impl Into<String>) -> Self {
        Self::new(TransactionErrorKind::Structural, message)
    }

    /// Insufficient-balance error
    pub fn state_insufficiency(message: impl Into<String>) -> Self {
        Self::new(TransactionErrorKind::StateInsufficiency, message)
    }

    /// Ledger-state conflict error
    pub fn state_conflict(message: impl Into<String>) -> Self {
        Self::new(TransactionErrorKind::StateConflict, message)
    }

    /// Cross-transaction conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(TransactionErrorKind::Conflict, message)
    }

    /// Attach the subject transaction id
    pub fn with_transaction(mut self, id: &TransactionId) -> Self {
        self.transaction_id = Some(id.clone());
        self
    }
}

impl fmt::Display for TransactionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TransactionError {}

/// Fatal error normalizing raw input into a [`Transaction`](crate::Transaction)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// Unrecognized or missing transaction type
    #[error("Invalid transaction type.")]
    InvalidType,
    /// Amount or fee is not a well-formed non-negative base-unit integer
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// Malformed address field
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    /// Malformed public key field
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
    /// Malformed signature field
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
    /// Raw input does not deserialize into the wire shape
    #[error("malformed transaction input: {0}")]
    MalformedInput(String),
}
