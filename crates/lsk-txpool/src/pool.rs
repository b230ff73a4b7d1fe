//! Staged transaction pool
//!
//! Transactions move through five stages, each backed by a [`Queue`]:
//!
//! ```text
//! received --> validated --> verified --> ready
//!                               |           ^
//!                               v           |
//!                            pending -------+
//! ```
//!
//! The pool owns no protocol policy. Each stage transition drains its source
//! queue through an injected classifier that decides, per entry, whether it
//! advances, parks in `pending`, or leaves the pool. Block commit, block
//! rollback, round rollback, expiry and capacity eviction reconcile the
//! queues against chain events.

use crate::entry::PooledTransaction;
use crate::queue::Queue;
use lsk_primitives::{Address, TransactionId};
use lsk_transactions::{Block, Transaction, TransactionError, TransactionType};
use std::collections::HashSet;
use std::time::{Duration, SystemTime};
use tracing::{debug, info, warn};

/// Pool sizing and expiry knobs
#[derive(Clone, Debug)]
pub struct PoolConfig {
    /// Total occupancy ceiling across all stages
    pub max_transactions: usize,
    /// Time-to-live for ordinary transactions
    pub expire_after: Duration,
    /// Time-to-live for transactions awaiting further signatures
    pub expire_after_pending: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            max_transactions: 4096,
            expire_after: Duration::from_secs(3 * 60 * 60),
            expire_after_pending: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// The verdict a classifier returns for one batch of entries.
///
/// `pending` is only meaningful for the verify stage; the other stages
/// leave it empty.
#[derive(Debug, Default)]
pub struct Classification {
    /// Entries that advance to the next stage
    pub accepted: Vec<PooledTransaction>,
    /// Entries that are not wrong but cannot advance yet
    pub pending: Vec<PooledTransaction>,
    /// Entries that leave the pool
    pub rejected: Vec<PooledTransaction>,
    /// One error per rejected entry, in no particular pairing
    pub errors: Vec<TransactionError>,
}

/// A stage transition policy: consumes a drained batch and a read-only
/// snapshot of transactions already promoted past the stage (so a tick
/// can see what earlier ticks let through), returns a verdict
pub type Classifier =
    Box<dyn Fn(Vec<PooledTransaction>, &[Transaction]) -> Classification + Send>;

/// What one pipeline tick rejected, and why
#[derive(Debug, Default)]
pub struct StageOutcome {
    /// Errors reported by the classifier
    pub errors: Vec<TransactionError>,
    /// Transactions that left the pool this tick
    pub invalid: Vec<Transaction>,
}

/// Five-stage transaction pool with injected stage policies
pub struct TransactionPool {
    config: PoolConfig,
    received: Queue,
    validated: Queue,
    verified: Queue,
    pending: Queue,
    ready: Queue,
    validate: Classifier,
    verify: Classifier,
    apply: Classifier,
}

impl TransactionPool {
    /// Build a pool from a config and the three stage classifiers
    pub fn new(
        config: PoolConfig,
        validate: Classifier,
        verify: Classifier,
        apply: Classifier,
    ) -> Self {
        TransactionPool {
            config,
            received: Queue::new(),
            validated: Queue::new(),
            verified: Queue::new(),
            pending: Queue::new(),
            ready: Queue::new(),
            validate,
            verify,
            apply,
        }
    }

    fn queues(&self) -> [&Queue; 5] {
        [&self.received, &self.validated, &self.verified, &self.pending, &self.ready]
    }

    fn queues_mut(&mut self) -> [&mut Queue; 5] {
        [
            &mut self.received,
            &mut self.validated,
            &mut self.verified,
            &mut self.pending,
            &mut self.ready,
        ]
    }

    /// Everything already past the verify stage, cloned for classifiers
    fn promoted_snapshot(&self) -> Vec<Transaction> {
        self.verified
            .iter()
            .chain(self.pending.iter())
            .chain(self.ready.iter())
            .map(|e| e.transaction.clone())
            .collect()
    }

    /// Whether a transaction id is present in any stage
    pub fn exists(&self, id: &TransactionId) -> bool {
        self.queues().iter().any(|q| q.exists(id))
    }

    /// Total occupancy across all stages
    pub fn len(&self) -> usize {
        self.queues().iter().map(|q| q.len()).sum()
    }

    /// Whether the pool holds no transactions
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Submit transactions into the `received` stage.
    ///
    /// Submission is idempotent: a transaction whose id is already present
    /// in any stage is skipped, so gossip duplicates never reset pipeline
    /// progress.
    pub fn add_transactions(&mut self, transactions: Vec<Transaction>) {
        for transaction in transactions {
            if self.exists(&transaction.id) {
                debug!("transaction {} already pooled, skipping", transaction.id);
                continue;
            }
            debug!("transaction {} entered received", transaction.id);
            self.received.enqueue_one(PooledTransaction::new(transaction));
        }
    }

    /// Run the validate classifier over everything in `received`.
    ///
    /// Accepted entries advance to `validated`; rejected ones leave the
    /// pool and are reported in the outcome.
    pub fn validate_received_transactions(&mut self) -> StageOutcome {
        let batch = self.received.remove_for(|_| true);
        if batch.is_empty() {
            return StageOutcome::default();
        }
        let Classification {
            accepted,
            rejected,
            errors,
            ..
        } = (self.validate)(batch, &[]);
        let mut outcome = StageOutcome::default();
        outcome.errors.extend(errors);
        outcome
            .invalid
            .extend(rejected.into_iter().map(|e| e.into_transaction()));
        if !outcome.invalid.is_empty() {
            info!("validate stage rejected {} transaction(s)", outcome.invalid.len());
        }
        self.validated.enqueue_many(accepted);
        outcome
    }

    /// Run the verify classifier over everything in `validated`.
    ///
    /// The classifier is handed the contents of `verified`, `pending` and
    /// `ready` alongside the batch, so conflict and balance decisions see
    /// what earlier ticks already promoted. Accepted entries advance to
    /// `verified`, pending ones park in `pending`, rejected ones leave the
    /// pool.
    pub fn verify_validated_transactions(&mut self) -> StageOutcome {
        let batch = self.validated.remove_for(|_| true);
        if batch.is_empty() {
            return StageOutcome::default();
        }
        let promoted = self.promoted_snapshot();
        let Classification {
            accepted,
            pending,
            rejected,
            errors,
        } = (self.verify)(batch, &promoted);
        let mut outcome = StageOutcome::default();
        outcome.errors.extend(errors);
        outcome
            .invalid
            .extend(rejected.into_iter().map(|e| e.into_transaction()));
        if !outcome.invalid.is_empty() {
            info!("verify stage rejected {} transaction(s)", outcome.invalid.len());
        }
        self.verified.enqueue_many(accepted);
        self.pending.enqueue_many(pending);
        outcome
    }

    /// Run the apply classifier over `verified` plus a re-drain of
    /// `pending`.
    ///
    /// The classifier is handed the current `ready` contents alongside the
    /// batch, so balances already committed to `ready` stay charged across
    /// ticks. Accepted entries land in `ready` with balance effects
    /// applied; still-pending ones park back in `pending`; rejected ones
    /// leave the pool.
    pub fn process_verified_transactions(&mut self) -> StageOutcome {
        let mut batch = self.verified.remove_for(|_| true);
        batch.extend(self.pending.remove_for(|_| true));
        if batch.is_empty() {
            return StageOutcome::default();
        }
        let committed: Vec<Transaction> =
            self.ready.iter().map(|e| e.transaction.clone()).collect();
        let Classification {
            accepted,
            pending,
            rejected,
            errors,
        } = (self.apply)(batch, &committed);
        let mut outcome = StageOutcome::default();
        outcome.errors.extend(errors);
        outcome
            .invalid
            .extend(rejected.into_iter().map(|e| e.into_transaction()));
        if !outcome.invalid.is_empty() {
            info!("apply stage rejected {} transaction(s)", outcome.invalid.len());
        }
        self.ready.enqueue_many(accepted);
        self.pending.enqueue_many(pending);
        outcome
    }

    /// Run all three stage transitions in pipeline order, merging outcomes
    pub fn process_pipeline(&mut self) -> StageOutcome {
        let mut outcome = self.validate_received_transactions();
        let verified = self.verify_validated_transactions();
        outcome.errors.extend(verified.errors);
        outcome.invalid.extend(verified.invalid);
        let processed = self.process_verified_transactions();
        outcome.errors.extend(processed.errors);
        outcome.invalid.extend(processed.invalid);
        outcome
    }

    /// Peek at up to `limit` ready transactions without mutating the pool.
    ///
    /// Ordered by descending fee, ties broken by earlier submission.
    pub fn get_processable_transactions(&self, limit: usize) -> Vec<Transaction> {
        let mut entries: Vec<&PooledTransaction> = self.ready.iter().collect();
        entries.sort_by(|a, b| {
            b.transaction
                .fee
                .cmp(&a.transaction.fee)
                .then(a.received_at.cmp(&b.received_at))
        });
        entries
            .into_iter()
            .take(limit)
            .map(|e| e.transaction.clone())
            .collect()
    }

    /// Reconcile the pool with a committed block: drop every transaction the
    /// block confirmed, then evict the oldest entries if occupancy still
    /// exceeds the configured ceiling.
    pub fn on_new_block(&mut self, block: &Block) {
        let confirmed: HashSet<&TransactionId> =
            block.transactions.iter().map(|t| &t.id).collect();
        let mut removed = 0usize;
        for queue in self.queues_mut() {
            removed += queue.remove_for(|e| confirmed.contains(e.id())).len();
        }
        debug!(
            "block at height {} confirmed {} pooled transaction(s)",
            block.height, removed
        );
        self.evict_to_capacity();
    }

    /// Reconcile the pool with a reverted block: its transactions are
    /// unconfirmed again and must restart the pipeline from `received`.
    /// Prior validation and balance assumptions are void.
    pub fn on_delete_block(&mut self, block: &Block) {
        let mut restored = 0usize;
        for transaction in &block.transactions {
            if self.exists(&transaction.id) {
                continue;
            }
            self.received
                .enqueue_one(PooledTransaction::new(transaction.clone()));
            restored += 1;
        }
        info!(
            "block at height {} reverted, {} transaction(s) returned to received",
            block.height, restored
        );
    }

    /// Reconcile the pool with a round rollback.
    ///
    /// Delegate-affecting transactions — `Vote` and `DelegateRegistration`
    /// types, plus anything sent by one of the rolled-back delegates — are
    /// pulled from the later stages and resubmitted into `received` with
    /// fresh bookkeeping, since the state they were checked against no
    /// longer exists.
    pub fn on_round_rollback(&mut self, delegates: &[Address]) {
        let senders: HashSet<&Address> = delegates.iter().collect();
        let affected = |e: &PooledTransaction| {
            matches!(
                e.transaction.tx_type,
                TransactionType::Vote | TransactionType::DelegateRegistration
            ) || senders.contains(&e.transaction.sender_id)
        };
        let mut pulled = Vec::new();
        pulled.extend(self.validated.remove_for(affected));
        pulled.extend(self.verified.remove_for(affected));
        pulled.extend(self.pending.remove_for(affected));
        pulled.extend(self.ready.remove_for(affected));
        if pulled.is_empty() {
            return;
        }
        info!("round rollback returned {} transaction(s) to received", pulled.len());
        for mut entry in pulled {
            entry.refresh();
            self.received.enqueue_one(entry);
        }
    }

    /// Drop every transaction older than its time-to-live.
    ///
    /// Transactions with pending multisignature semantics get the longer
    /// TTL; everything else the shorter one. The sweep always visits every
    /// queue.
    pub fn expire_transactions(&mut self) {
        self.expire_transactions_at(SystemTime::now());
    }

    fn expire_transactions_at(&mut self, now: SystemTime) {
        let expire_after = self.config.expire_after;
        let expire_after_pending = self.config.expire_after_pending;
        let mut expired = 0usize;
        for queue in self.queues_mut() {
            expired += queue
                .remove_for(|e| {
                    let ttl = if awaiting_more_signatures(&e.transaction) {
                        expire_after_pending
                    } else {
                        expire_after
                    };
                    match now.duration_since(e.received_at) {
                        Ok(age) => age > ttl,
                        Err(_) => false,
                    }
                })
                .len();
        }
        if expired > 0 {
            info!("expired {} transaction(s)", expired);
        }
    }

    fn evict_to_capacity(&mut self) {
        let excess = self.len().saturating_sub(self.config.max_transactions);
        if excess == 0 {
            return;
        }
        let mut candidates: Vec<(SystemTime, TransactionId)> = self
            .queues()
            .iter()
            .flat_map(|q| q.iter())
            .map(|e| (e.received_at, e.id().clone()))
            .collect();
        candidates.sort_by(|a, b| a.0.cmp(&b.0));
        let doomed: HashSet<TransactionId> =
            candidates.into_iter().take(excess).map(|(_, id)| id).collect();
        for queue in self.queues_mut() {
            queue.remove_for(|e| doomed.contains(e.id()));
        }
        warn!("pool over capacity, evicted {} oldest transaction(s)", excess);
    }
}

/// Whether a transaction is still collecting multisignature approvals
fn awaiting_more_signatures(transaction: &Transaction) -> bool {
    transaction.tx_type == TransactionType::Multisignature || !transaction.signatures.is_empty()
}
