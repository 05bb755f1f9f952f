//! Account number type
//!
//! Human-facing 7-digit account identifiers. Generation is uniform random
//! over the full 7-digit range; uniqueness is enforced at write time by the
//! store, with the provisioning layer retrying on collision.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive bounds of the 7-digit range (no leading zero).
const MIN_VALUE: u32 = 1_000_000;
const MAX_VALUE: u32 = 9_999_999;

/// A validated 7-digit account number.
///
/// # Invariants
/// - Exactly 7 ASCII digits
/// - No leading zero
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountNumber(String);

/// Errors that can occur when parsing an AccountNumber.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountNumberError {
    #[error("Account number must be exactly 7 digits (got {0:?})")]
    WrongLength(String),

    #[error("Account number must be numeric (got {0:?})")]
    NotNumeric(String),

    #[error("Account number must not start with zero (got {0:?})")]
    LeadingZero(String),
}

impl AccountNumber {
    /// Generate a fresh candidate account number.
    ///
    /// Uniform over [1,000,000–9,999,999]. Collisions against existing
    /// profiles are possible and must be handled by the caller.
    pub fn generate() -> AccountNumber {
        let value = rand::thread_rng().gen_range(MIN_VALUE..=MAX_VALUE);
        AccountNumber(value.to_string())
    }

    /// Validate a string read back from storage or the wire.
    pub fn parse(s: &str) -> Result<AccountNumber, AccountNumberError> {
        if s.len() != 7 {
            return Err(AccountNumberError::WrongLength(s.to_string()));
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AccountNumberError::NotNumeric(s.to_string()));
        }
        if s.starts_with('0') {
            return Err(AccountNumberError::LeadingZero(s.to_string()));
        }
        Ok(AccountNumber(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountNumber {
    type Err = AccountNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccountNumber::parse(s)
    }
}

impl TryFrom<String> for AccountNumber {
    type Error = AccountNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AccountNumber::parse(&value)
    }
}

impl From<AccountNumber> for String {
    fn from(number: AccountNumber) -> Self {
        number.0
    }
}
