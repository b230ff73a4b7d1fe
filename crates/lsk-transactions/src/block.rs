//! Minimal block view
//!
//! The pool only needs to know which transactions a block carries; block
//! production and consensus live elsewhere.

use crate::transaction::Transaction;

/// Block as seen by the transaction pool
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    /// Chain height of the block
    pub height: u64,
    /// Transactions included in the block
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Create a block view
    pub fn new(height: u64, transactions: Vec<Transaction>) -> Self {
        Block {
            height,
            transactions,
        }
    }
}
