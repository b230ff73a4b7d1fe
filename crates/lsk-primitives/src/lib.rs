//! # lsk-primitives
//!
//! Primitive value types for the lsk-core transaction subsystem.
//!
//! This crate provides the fundamental data types used throughout the system:
//! addresses, public keys, raw signature bytes, exact-precision monetary
//! amounts and transaction identifiers.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod amount;
mod id;
mod keys;

pub use address::{Address, AddressError};
pub use amount::{Amount, AmountError};
pub use id::TransactionId;
pub use keys::{KeyError, PublicKey, Signature, SignatureError};

/// Protocol timestamp: seconds since the network epoch
pub type EpochTimestamp = u32;
