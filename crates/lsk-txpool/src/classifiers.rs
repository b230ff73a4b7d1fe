//! Canonical stage policies
//!
//! The pool itself is policy-free; these factories build the three
//! classifiers a host wires into [`TransactionPool`](crate::TransactionPool)
//! to get protocol behavior: stateless validation, verification against
//! ledger state plus pool conflicts, and cumulative balance application.
//! Ledger reads go through [`AccountView`] so hosts decide where accounts
//! actually live.

use crate::entry::PooledTransaction;
use crate::pool::{Classification, Classifier};
use lsk_primitives::{Address, Amount};
use lsk_transactions::{Account, Transaction, TransactionError};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Read access to ledger account state
pub trait AccountView: Send + Sync {
    /// Fetch an account snapshot, `None` when the address is unknown
    fn account(&self, address: &Address) -> Option<Account>;
}

/// A `HashMap`-backed [`AccountView`] for tests and in-process hosts
#[derive(Debug, Default)]
pub struct InMemoryAccounts {
    accounts: HashMap<Address, Account>,
}

impl InMemoryAccounts {
    /// Create an empty view
    pub fn new() -> Self {
        InMemoryAccounts::default()
    }

    /// Insert or replace an account snapshot
    pub fn insert(&mut self, account: Account) {
        self.accounts.insert(account.address, account);
    }
}

impl AccountView for InMemoryAccounts {
    fn account(&self, address: &Address) -> Option<Account> {
        self.accounts.get(address).cloned()
    }
}

/// Stateless validation policy for the received stage
pub fn validate_classifier() -> Classifier {
    Box::new(|batch, _| {
        let mut classification = Classification::default();
        for entry in batch {
            let outcome = entry.transaction.validate();
            if outcome.validated {
                classification.accepted.push(entry);
            } else {
                debug!("transaction {} failed validation", entry.id());
                classification.errors.extend(outcome.errors);
                classification.rejected.push(entry);
            }
        }
        classification
    })
}

/// State and conflict verification policy for the validated stage.
///
/// Conflicts are checked against the batch's other members plus everything
/// the pool already promoted, and run before the state check, so a
/// clashing transaction reports the conflict even when its sender is also
/// broke. Fetched sender snapshots are charged for promoted transactions
/// first, so balances committed by earlier ticks stay spent. Incomplete
/// multisignature transactions classify as pending rather than accepted.
pub fn verify_classifier(state: Arc<dyn AccountView>) -> Classifier {
    Box::new(move |batch, promoted| {
        let accounts = fetch_accounts(state.as_ref(), &batch, promoted);
        let mut others: Vec<Transaction> =
            batch.iter().map(|e| e.transaction.clone()).collect();
        others.extend(promoted.iter().cloned());
        let mut classification = Classification::default();
        for entry in batch {
            let conflicts = entry
                .transaction
                .verify_against_other_transactions(&others);
            if !conflicts.verified {
                debug!("transaction {} conflicts with the pool", entry.id());
                classification.errors.extend(conflicts.errors);
                classification.rejected.push(entry);
                continue;
            }
            let sender = sender_snapshot(&accounts, &entry.transaction);
            let outcome = entry.transaction.verify_against_state(&sender);
            if !outcome.verified {
                debug!("transaction {} failed state verification", entry.id());
                classification.errors.extend(outcome.errors);
                classification.rejected.push(entry);
                continue;
            }
            if awaiting_signatures(&entry.transaction) {
                classification.pending.push(entry);
            } else {
                classification.accepted.push(entry);
            }
        }
        classification
    })
}

/// Balance application policy for the verified stage.
///
/// Charges each sender cumulatively across the batch, seeded with the
/// costs of transactions already committed to `ready`, so a second
/// transaction from the same sender must fit in what earlier ticks and
/// batch predecessors left behind. Accepted entries come back with their
/// applied flag set.
pub fn apply_classifier(state: Arc<dyn AccountView>) -> Classifier {
    Box::new(move |batch, committed| {
        let mut balances: HashMap<Address, Account> = HashMap::new();
        let mut classification = Classification::default();
        for mut entry in batch {
            let sender_id = entry.transaction.sender_id;
            let sender = balances.entry(sender_id).or_insert_with(|| {
                let account = state
                    .account(&sender_id)
                    .unwrap_or_else(|| Account::new(sender_id, Amount::ZERO));
                charge_committed(account, committed)
            });
            let cost = entry.transaction.cost().unwrap_or(Amount::MAX);
            if sender.balance < cost {
                classification.errors.push(
                    TransactionError::state_insufficiency(format!(
                        "Account does not have enough LSK: {} balance: {}",
                        sender.address,
                        sender.balance.to_display_string()
                    ))
                    .with_transaction(entry.id()),
                );
                classification.rejected.push(entry);
                continue;
            }
            if awaiting_signatures(&entry.transaction) {
                classification.pending.push(entry);
                continue;
            }
            let charged = entry.apply(sender);
            *sender = charged;
            classification.accepted.push(entry);
        }
        classification
    })
}

/// Batch-fetch every account the entries declare they need, charged for
/// transactions the pool already promoted
fn fetch_accounts(
    state: &dyn AccountView,
    batch: &[PooledTransaction],
    promoted: &[Transaction],
) -> HashMap<Address, Account> {
    let mut accounts = HashMap::new();
    for entry in batch {
        for address in entry.transaction.required_attributes().accounts {
            if accounts.contains_key(&address) {
                continue;
            }
            let snapshot = state
                .account(&address)
                .unwrap_or_else(|| Account::new(address, Amount::ZERO));
            accounts.insert(address, charge_committed(snapshot, promoted));
        }
    }
    accounts
}

/// Charge an account for every listed transaction it sent
fn charge_committed(account: Account, committed: &[Transaction]) -> Account {
    let address = account.address;
    committed
        .iter()
        .filter(|t| t.sender_id == address)
        .fold(account, |acc, t| t.apply_to(&acc))
}

/// The fetched sender snapshot; an unknown sender behaves as a keyless
/// zero-balance account
fn sender_snapshot(accounts: &HashMap<Address, Account>, transaction: &Transaction) -> Account {
    accounts
        .get(&transaction.sender_id)
        .cloned()
        .unwrap_or_else(|| Account::new(transaction.sender_id, Amount::ZERO))
}

/// Whether a multisignature transaction still lacks signatures, judged
/// against its declared minimum
fn awaiting_signatures(transaction: &Transaction) -> bool {
    match transaction.asset_u64("/multisignature/min") {
        Some(min) => (transaction.signatures.len() as u64) < min,
        None => false,
    }
}
