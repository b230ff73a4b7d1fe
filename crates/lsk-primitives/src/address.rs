//! Numeric account address rendered as `"<u64>L"`

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Address parsing error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Missing the trailing `L` marker
    #[error("address is missing the trailing 'L': {0}")]
    MissingSuffix(String),
    /// Numeric part is not a valid u64
    #[error("invalid numeric address: {0}")]
    InvalidNumber(String),
}

/// Account address: a u64 derived from the account public key, displayed
/// with a trailing `L`. The canonical byte form is the big-endian u64.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Address(u64);

impl Address {
    /// Size of the canonical byte form
    pub const LEN: usize = 8;

    /// Address `0L`, used as the placeholder when no recipient exists
    pub const ZERO: Address = Address(0);

    /// Create an address from its numeric value
    pub fn new(raw: u64) -> Self {
        Address(raw)
    }

    /// Canonical byte form (big-endian)
    pub fn to_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// Numeric value
    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// Check whether this is the zero address
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}L", self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({}L)", self.0)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_suffix('L')
            .ok_or_else(|| AddressError::MissingSuffix(s.to_string()))?;
        let raw = digits
            .parse::<u64>()
            .map_err(|_| AddressError::InvalidNumber(s.to_string()))?;
        Ok(Address(raw))
    }
}

impl From<u64> for Address {
    fn from(raw: u64) -> Self {
        Address(raw)
    }
}
