//! Ordered, indexed transaction storage
//!
//! The pipeline's storage primitive: insertion order plus an id index for
//! O(1) membership tests. No protocol knowledge lives here; deduplication is
//! the caller's responsibility.

use crate::entry::PooledTransaction;
use lsk_primitives::TransactionId;
use std::collections::HashSet;

/// An ordered sequence of pool entries with an id membership index.
///
/// Invariant: every id in the index appears exactly once in the sequence and
/// vice versa.
#[derive(Debug, Default)]
pub struct Queue {
    transactions: Vec<PooledTransaction>,
    index: HashSet<TransactionId>,
}

impl Queue {
    /// Create an empty queue
    pub fn new() -> Self {
        Queue::default()
    }

    /// Append a single entry at the tail
    pub fn enqueue_one(&mut self, entry: PooledTransaction) {
        self.index.insert(entry.id().clone());
        self.transactions.push(entry);
    }

    /// Append entries at the tail in argument order
    pub fn enqueue_many(&mut self, entries: Vec<PooledTransaction>) {
        for entry in entries {
            self.enqueue_one(entry);
        }
    }

    /// O(1) membership test by id
    pub fn exists(&self, id: &TransactionId) -> bool {
        self.index.contains(id)
    }

    /// Remove every entry matching the predicate, regardless of position.
    ///
    /// Removed entries are returned in their original relative order;
    /// survivors keep theirs.
    pub fn remove_for<F>(&mut self, mut predicate: F) -> Vec<PooledTransaction>
    where
        F: FnMut(&PooledTransaction) -> bool,
    {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.transactions.len());
        for entry in self.transactions.drain(..) {
            if predicate(&entry) {
                self.index.remove(entry.id());
                removed.push(entry);
            } else {
                kept.push(entry);
            }
        }
        self.transactions = kept;
        removed
    }

    /// Pop entries from the tail while the predicate holds.
    ///
    /// The predicate is evaluated once per prospective pop; the first false
    /// result (or an empty queue) stops the drain. Popped entries are
    /// returned in their original relative order, leaving the untouched
    /// prefix behind.
    pub fn dequeue_until<F>(&mut self, mut predicate: F) -> Vec<PooledTransaction>
    where
        F: FnMut() -> bool,
    {
        let mut popped = Vec::new();
        while !self.transactions.is_empty() && predicate() {
            if let Some(entry) = self.transactions.pop() {
                self.index.remove(entry.id());
                popped.push(entry);
            }
        }
        popped.reverse();
        popped
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the queue holds no entries
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &PooledTransaction> {
        self.transactions.iter()
    }
}
