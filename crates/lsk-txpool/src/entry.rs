//! Pool-local transaction entry
//!
//! The protocol record is immutable; everything the pool needs to track per
//! transaction (submission time, application state) lives here, outside the
//! byte encoding and identity.

use lsk_primitives::TransactionId;
use lsk_transactions::{Account, Transaction};
use std::time::SystemTime;

/// A transaction wrapped with pool bookkeeping
#[derive(Clone, Debug)]
pub struct PooledTransaction {
    /// The immutable protocol record
    pub transaction: Transaction,
    /// Wall-clock submission time; refreshed whenever the transaction
    /// re-enters the `received` stage
    pub received_at: SystemTime,
    applied: bool,
}

impl PooledTransaction {
    /// Wrap a freshly submitted transaction
    pub fn new(transaction: Transaction) -> Self {
        PooledTransaction {
            transaction,
            received_at: SystemTime::now(),
            applied: false,
        }
    }

    /// The wrapped transaction's id
    pub fn id(&self) -> &TransactionId {
        &self.transaction.id
    }

    /// Whether balance effects have been applied for this entry
    pub fn is_applied(&self) -> bool {
        self.applied
    }

    /// Reset bookkeeping for re-entry into the pipeline
    pub fn refresh(&mut self) {
        self.received_at = SystemTime::now();
        self.applied = false;
    }

    /// Apply balance effects to the sender snapshot, guarded against double
    /// application: a no-op returning the account unchanged when already
    /// applied.
    pub fn apply(&mut self, sender: &Account) -> Account {
        if self.applied {
            return sender.clone();
        }
        self.applied = true;
        self.transaction.apply_to(sender)
    }

    /// Reverse balance effects, guarded symmetrically: a no-op when the
    /// entry was never applied.
    pub fn undo(&mut self, sender: &Account) -> Account {
        if !self.applied {
            return sender.clone();
        }
        self.applied = false;
        self.transaction.undo_to(sender)
    }

    /// Unwrap back into the protocol record
    pub fn into_transaction(self) -> Transaction {
        self.transaction
    }
}
