//! Ledger account snapshot
//!
//! Accounts are owned by the ledger store outside this subsystem; this type
//! is a read-only snapshot consulted during verification and transformed
//! (never mutated) by balance effects.

use lsk_primitives::{Address, Amount, PublicKey};

/// Point-in-time view of a ledger account
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    /// Account address
    pub address: Address,
    /// Confirmed balance in base units
    pub balance: Amount,
    /// Confirmed public key, absent until the first outgoing transaction
    pub public_key: Option<PublicKey>,
    /// Registered second public key, if any
    pub second_public_key: Option<PublicKey>,
}

impl Account {
    /// Create a keyless account snapshot
    pub fn new(address: Address, balance: Amount) -> Self {
        Account {
            address,
            balance,
            public_key: None,
            second_public_key: None,
        }
    }

    /// Attach the confirmed public key
    pub fn with_public_key(mut self, key: PublicKey) -> Self {
        self.public_key = Some(key);
        self
    }

    /// Attach the registered second public key
    pub fn with_second_public_key(mut self, key: PublicKey) -> Self {
        self.second_public_key = Some(key);
        self
    }
}
