//! Structural validation, state verification and conflict checks
//!
//! All outcomes are result records carrying collected errors; nothing in
//! this module returns `Err` or panics. Check order within each operation is
//! fixed so the first reported error is deterministic.

use crate::account::Account;
use crate::error::TransactionError;
use crate::transaction::{Transaction, TransactionType};
use serde_json::Value;

/// Outcome of local, stateless validation
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationOutcome {
    /// True when no errors were found
    pub validated: bool,
    /// All discovered errors, in check order
    pub errors: Vec<TransactionError>,
}

/// Outcome of verification against ledger state or other transactions
#[derive(Clone, Debug, PartialEq)]
pub struct VerificationOutcome {
    /// True when no errors were found
    pub verified: bool,
    /// All discovered errors, in check order
    pub errors: Vec<TransactionError>,
}

impl VerificationOutcome {
    fn from_errors(errors: Vec<TransactionError>) -> Self {
        VerificationOutcome {
            verified: errors.is_empty(),
            errors,
        }
    }
}

impl Transaction {
    /// Local, stateless validation.
    ///
    /// Checks run in fixed order and every failure is collected, so
    /// `errors[0]` is reproducible: (1) signature presence, (2) monetary
    /// well-formedness of the total cost, (3) asset shape for the
    /// transaction's kind. Type recognition is enforced earlier, at
    /// construction.
    pub fn validate(&self) -> ValidationOutcome {
        let mut errors = Vec::new();

        if self.signature.is_none() {
            errors.push(
                TransactionError::structural("Cannot validate transaction without signature.")
                    .with_transaction(&self.id),
            );
        }

        if self.cost().is_none() {
            errors.push(
                TransactionError::structural(format!(
                    "Transaction cost overflows the base unit range: amount {} fee {}",
                    self.amount, self.fee
                ))
                .with_transaction(&self.id),
            );
        }

        if let Some(error) = self.asset_shape_error() {
            errors.push(error);
        }

        ValidationOutcome {
            validated: errors.is_empty(),
            errors,
        }
    }

    /// Verify against the sender's current ledger snapshot.
    ///
    /// Checks, in order: confirmed public key match, then balance coverage
    /// of `amount + fee` with exact integer comparison.
    pub fn verify_against_state(&self, sender: &Account) -> VerificationOutcome {
        let mut errors = Vec::new();

        if let Some(confirmed) = &sender.public_key {
            if *confirmed != self.sender_public_key {
                errors.push(
                    TransactionError::state_conflict(format!(
                        "Invalid sender public key: {} expected: {}",
                        self.sender_public_key, confirmed
                    ))
                    .with_transaction(&self.id),
                );
            }
        }

        let covered = match self.cost() {
            Some(cost) => sender.balance >= cost,
            None => false,
        };
        if !covered {
            errors.push(
                TransactionError::state_insufficiency(format!(
                    "Account does not have enough LSK: {} balance: {}",
                    sender.address,
                    sender.balance.to_display_string()
                ))
                .with_transaction(&self.id),
            );
        }

        VerificationOutcome::from_errors(errors)
    }

    /// Verify against the other transactions currently in the pool.
    ///
    /// Kinds carrying unique data conflict with another pool transaction of
    /// the same kind from the same sender; every other kind verifies
    /// unconditionally. `others` is read-only.
    pub fn verify_against_other_transactions(
        &self,
        others: &[Transaction],
    ) -> VerificationOutcome {
        if !self.contains_unique_data() {
            return VerificationOutcome::from_errors(Vec::new());
        }

        let clash = others.iter().any(|other| {
            other.id != self.id
                && other.sender_id == self.sender_id
                && other.tx_type == self.tx_type
        });
        if !clash {
            return VerificationOutcome::from_errors(Vec::new());
        }

        VerificationOutcome::from_errors(vec![TransactionError::conflict(format!(
            "Conflicting {} transaction from {} already in pool",
            self.tx_type, self.sender_id
        ))
        .with_transaction(&self.id)])
    }

    fn asset_shape_error(&self) -> Option<TransactionError> {
        let shaped = match self.tx_type {
            TransactionType::Transfer | TransactionType::OutTransfer => {
                self.recipient_id.is_some()
            }
            TransactionType::SecondSignature => self.asset_str("/signature/publicKey"),
            TransactionType::DelegateRegistration => self.asset_str("/delegate/username"),
            TransactionType::Vote => self.asset_array("/votes"),
            TransactionType::Multisignature => {
                self.asset_u64("/multisignature/min").is_some()
                    && self.asset_u64("/multisignature/lifetime").is_some()
                    && self.asset_array("/multisignature/keysgroup")
            }
            TransactionType::Dapp => self.asset_str("/dapp/name"),
            TransactionType::InTransfer => self.asset_str("/inTransfer/dappId"),
        };
        if shaped {
            return None;
        }

        let message = match self.tx_type {
            TransactionType::Transfer | TransactionType::OutTransfer => {
                "Transaction requires a recipient address."
            }
            TransactionType::SecondSignature => "Second signature asset requires a public key.",
            TransactionType::DelegateRegistration => "Delegate asset requires a username.",
            TransactionType::Vote => "Vote asset requires a votes array.",
            TransactionType::Multisignature => {
                "Multisignature asset requires min, lifetime and keysgroup."
            }
            TransactionType::Dapp => "Dapp asset requires a name.",
            TransactionType::InTransfer => "InTransfer asset requires a dapp id.",
        };
        Some(TransactionError::structural(message).with_transaction(&self.id))
    }

    fn asset_str(&self, pointer: &str) -> bool {
        self.asset
            .pointer(pointer)
            .and_then(Value::as_str)
            .is_some()
    }

    fn asset_array(&self, pointer: &str) -> bool {
        self.asset
            .pointer(pointer)
            .and_then(Value::as_array)
            .is_some()
    }

    /// Read a numeric asset field, used both for shape checks and by pool
    /// policy (e.g. the multisignature minimum)
    pub fn asset_u64(&self, pointer: &str) -> Option<u64> {
        self.asset.pointer(pointer).and_then(Value::as_u64)
    }
}
