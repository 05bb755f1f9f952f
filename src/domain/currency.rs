//! Currency type and country resolution
//!
//! Currencies are a closed set; every profile carries exactly one, derived
//! from the signup country at creation time and never recomputed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported settlement currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "GBP")]
    Gbp,
    #[serde(rename = "NGN")]
    Ngn,
    #[serde(rename = "INR")]
    Inr,
    #[serde(rename = "CAD")]
    Cad,
    #[serde(rename = "AUD")]
    Aud,
    #[serde(rename = "EUR")]
    Eur,
}

/// Fallback for countries with no mapping. Currency is a convenience
/// attribute, so unknown countries degrade to USD rather than failing.
pub const DEFAULT_CURRENCY: Currency = Currency::Usd;

impl Currency {
    /// Resolve a country code to its currency. Total over all inputs:
    /// unmapped codes resolve to [`DEFAULT_CURRENCY`].
    pub fn for_country(country: &str) -> Currency {
        match country {
            "US" => Currency::Usd,
            "UK" => Currency::Gbp,
            "NG" => Currency::Ngn,
            "IN" => Currency::Inr,
            "CA" => Currency::Cad,
            "AU" => Currency::Aud,
            "DE" | "FR" => Currency::Eur,
            _ => DEFAULT_CURRENCY,
        }
    }

    /// ISO 4217 alphabetic code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Ngn => "NGN",
            Currency::Inr => "INR",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Eur => "EUR",
        }
    }

    /// Number of fractional digits amounts in this currency carry.
    pub fn exponent(&self) -> u32 {
        // All supported currencies are 2-digit minor units.
        2
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USD" => Ok(Currency::Usd),
            "GBP" => Ok(Currency::Gbp),
            "NGN" => Ok(Currency::Ngn),
            "INR" => Ok(Currency::Inr),
            "CAD" => Ok(Currency::Cad),
            "AUD" => Ok(Currency::Aud),
            "EUR" => Ok(Currency::Eur),
            other => Err(UnknownCurrency(other.to_string())),
        }
    }
}

/// A currency code outside the supported set was read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown currency code: {0}")]
pub struct UnknownCurrency(pub String);
