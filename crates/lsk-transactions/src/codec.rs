//! Canonical transaction byte encoding
//!
//! Fixed field order, fixed per-field widths. This encoding defines both the
//! signed payload and the hash input for transaction identity, so it must be
//! reproduced bit-exact by any compatible implementation. Pool bookkeeping is
//! never part of it.

use crate::transaction::Transaction;

/// Encode the canonical (signed) fields of a transaction.
///
/// Pure and idempotent: repeat calls on the same record yield identical
/// bytes.
pub fn encode_transaction(tx: &Transaction) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.push(tx.tx_type.as_u8());                                  // 1
    buf.extend_from_slice(&tx.timestamp.to_le_bytes());            // 4
    buf.extend_from_slice(tx.sender_public_key.as_bytes());        // 32
    match tx.recipient_id {
        Some(recipient) => buf.extend_from_slice(&recipient.to_bytes()), // 8, big-endian
        None => buf.extend_from_slice(&[0u8; 8]),                  // 8
    }
    buf.extend_from_slice(&tx.amount.to_le_bytes());               // 8
    if let Some(signature) = &tx.signature {
        buf.extend_from_slice(signature.as_bytes());               // variable
    }
    if let Some(second) = &tx.second_signature {
        buf.extend_from_slice(second.as_bytes());                  // variable
    }
    buf
}
