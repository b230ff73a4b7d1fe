//! Pure balance effects on account snapshots
//!
//! Both operations return a new snapshot and never mutate their input. The
//! double-application guard lives with the pool bookkeeping, not here; these
//! functions are the raw arithmetic, exact inverses of each other for any
//! account that can cover the cost.

use crate::account::Account;
use crate::transaction::Transaction;
use lsk_primitives::Amount;

impl Transaction {
    /// Sender snapshot after this transaction: balance minus `amount + fee`.
    ///
    /// Saturates at zero; callers verify coverage beforehand, so saturation
    /// only occurs on paths that are already invalid.
    pub fn apply_to(&self, sender: &Account) -> Account {
        let cost = self.cost().unwrap_or(Amount::MAX);
        Account {
            balance: sender.balance.saturating_sub(cost),
            ..sender.clone()
        }
    }

    /// Sender snapshot with this transaction's effects reversed: balance
    /// plus `amount + fee`.
    pub fn undo_to(&self, sender: &Account) -> Account {
        let cost = self.cost().unwrap_or(Amount::MAX);
        Account {
            balance: sender.balance.saturating_add(cost),
            ..sender.clone()
        }
    }
}
