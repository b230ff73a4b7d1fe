//! Exact-precision monetary amount in base units
//!
//! All balances, amounts and fees are integers denominated in the smallest
//! ledger unit. One display unit (1 LSK) is 10^8 base units; display-scale
//! rendering is done with integer division and remainder only, never through
//! floating point.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Amount parsing error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// Input is not a well-formed non-negative base-unit integer
    #[error("invalid amount: {0}")]
    InvalidDigits(String),
}

/// Monetary quantity in base units
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Amount(u64);

impl Amount {
    /// Base units per display unit
    pub const SCALE: u64 = 100_000_000;

    /// Zero base units
    pub const ZERO: Amount = Amount(0);

    /// Largest representable quantity
    pub const MAX: Amount = Amount(u64::MAX);

    /// Create an amount from raw base units
    pub fn from_base_units(units: u64) -> Self {
        Amount(units)
    }

    /// Raw base units
    pub fn base_units(self) -> u64 {
        self.0
    }

    /// Checked addition
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Saturating addition
    pub fn saturating_add(self, other: Amount) -> Amount {
        Amount(self.0.saturating_add(other.0))
    }

    /// Saturating subtraction
    pub fn saturating_sub(self, other: Amount) -> Amount {
        Amount(self.0.saturating_sub(other.0))
    }

    /// Canonical byte form (little-endian u64)
    pub fn to_le_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    /// Render at display scale (`base units / 10^8`) with exact precision.
    ///
    /// The fractional part is trimmed of trailing zeros and omitted entirely
    /// when zero, matching the reference wallet rendering: `0`, `0.1`,
    /// `1.23456789`.
    pub fn to_display_string(self) -> String {
        let whole = self.0 / Self::SCALE;
        let frac = self.0 % Self::SCALE;
        if frac == 0 {
            return whole.to_string();
        }
        let frac = format!("{:08}", frac);
        format!("{}.{}", whole, frac.trim_end_matches('0'))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({})", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let units = s
            .parse::<u64>()
            .map_err(|_| AmountError::InvalidDigits(s.to_string()))?;
        Ok(Amount(units))
    }
}

impl From<u64> for Amount {
    fn from(units: u64) -> Self {
        Amount(units)
    }
}
