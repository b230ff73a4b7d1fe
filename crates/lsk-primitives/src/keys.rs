//! Public key and raw signature byte containers
//!
//! Cryptographic verification happens outside this subsystem; these types
//! only carry bytes and their hex string forms.

use bytes::Bytes;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Public key parsing error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// Invalid hex string
    #[error("invalid public key hex: {0}")]
    InvalidHex(String),
    /// Invalid length
    #[error("invalid public key length: expected 32 bytes, got {0}")]
    InvalidLength(usize),
}

/// Signature parsing error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// Invalid hex string
    #[error("invalid signature hex: {0}")]
    InvalidHex(String),
}

/// 32-byte account public key
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; 32]);

impl PublicKey {
    /// Size of a public key in bytes
    pub const LEN: usize = 32;

    /// Create a public key from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        PublicKey(bytes)
    }

    /// Create a public key from a byte slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        if slice.len() != Self::LEN {
            return Err(KeyError::InvalidLength(slice.len()));
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(slice);
        Ok(PublicKey(bytes))
    }

    /// Get as byte slice
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex string form (no prefix)
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|e| KeyError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

/// Opaque raw signature bytes, appended verbatim to the canonical encoding
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Signature(Bytes);

impl Signature {
    /// Create a signature from raw bytes
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Signature(bytes.into())
    }

    /// Get as byte slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the signature is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hex string form (no prefix)
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

impl FromStr for Signature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|e| SignatureError::InvalidHex(e.to_string()))?;
        Ok(Signature(Bytes::from(bytes)))
    }
}
