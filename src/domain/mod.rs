//! Domain types
//!
//! Pure domain primitives with no infrastructure dependencies.

mod account_number;
mod balance;
mod context;
mod currency;
mod profile;

pub use account_number::{AccountNumber, AccountNumberError};
pub use balance::{Balance, BalanceError};
pub use context::OperationContext;
pub use currency::{Currency, UnknownCurrency, DEFAULT_CURRENCY};
pub use profile::{IdentityRef, NewProfile, UserProfile};
