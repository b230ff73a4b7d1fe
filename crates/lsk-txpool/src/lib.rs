//! Staged transaction pool
//!
//! Holds unconfirmed transactions and moves them toward block inclusion
//! through externally triggered pipeline ticks:
//!
//! ```text
//!          add_transactions
//!                 |
//!                 v
//!  +----------+      +-----------+      +----------+      +-------+
//!  | received | ---> | validated | ---> | verified | ---> | ready |
//!  +----------+      +-----------+      +----------+      +-------+
//!       ^                                     |               ^
//!       |                               +---------+           |
//!   chain events <--------------------- | pending | ----------+
//!   (new block, delete block,           +---------+
//!    round rollback, expiry)
//! ```
//!
//! - **Queues**: ordered, id-indexed storage with no protocol knowledge
//! - **Classifiers**: injected stage policies; the canonical set in
//!   [`classifiers`] wires in the transaction checks from
//!   `lsk-transactions`
//! - **Reconciliation**: block commit and rollback, round rollback,
//!   expiry and capacity eviction keep the pool consistent with the chain

#![warn(missing_docs)]
#![warn(clippy::all)]

mod classifiers;
mod entry;
mod pool;
mod queue;

pub use classifiers::{
    apply_classifier, validate_classifier, verify_classifier, AccountView, InMemoryAccounts,
};
pub use entry::PooledTransaction;
pub use pool::{Classification, Classifier, PoolConfig, StageOutcome, TransactionPool};
pub use queue::Queue;
