//! Balance type
//!
//! Domain primitive for account balances. Balances are validated at
//! construction time: a negative balance cannot exist in the system. No
//! money-movement path exists yet, so the only producer is provisioning
//! (zero) and the only other source is the store read path.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Currency;

/// A non-negative monetary balance, denominated in the owning profile's
/// currency.
///
/// Serialized as a decimal string (never a binary float) so consumers can
/// parse it back into a fixed-point type without precision loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Balance(Decimal);

/// Errors that can occur when creating a Balance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BalanceError {
    #[error("Balance must not be negative (got {0})")]
    Negative(Decimal),

    #[error("Invalid balance format: {0}")]
    ParseError(String),
}

impl Balance {
    /// Create a new balance (zero or positive).
    pub fn new(value: Decimal) -> Result<Self, BalanceError> {
        if value < Decimal::ZERO {
            return Err(BalanceError::Negative(value));
        }
        Ok(Self(value))
    }

    /// The opening balance of every freshly provisioned profile.
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Render with the minor-unit precision of the given currency.
    pub fn display_in(&self, currency: Currency) -> String {
        format!("{:.1$}", self.0, currency.exponent() as usize)
    }
}

impl Default for Balance {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Balance {
    type Err = BalanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s).map_err(|e| BalanceError::ParseError(e.to_string()))?;
        Balance::new(decimal)
    }
}

impl TryFrom<String> for Balance {
    type Error = BalanceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Balance::from_str(&value)
    }
}

impl From<Balance> for String {
    fn from(balance: Balance) -> Self {
        format!("{:.2}", balance.0)
    }
}

impl From<Balance> for Decimal {
    fn from(balance: Balance) -> Self {
        balance.0
    }
}

impl TryFrom<Decimal> for Balance {
    type Error = BalanceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Balance::new(value)
    }
}
