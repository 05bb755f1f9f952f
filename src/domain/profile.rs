//! User profile records
//!
//! The local financial-identity record: one per successfully provisioned
//! identity. Created exactly once by provisioning, read many times by the
//! lookup service. No update or delete path exists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AccountNumber, Balance, Currency};

/// The identity provider's stable uid for a user.
///
/// Stored as a first-class foreign key on the profile at creation time and
/// used for all joins between the two systems. Email is a lookup key only;
/// it is mutable at the provider and must never be used to join.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityRef(pub String);

impl IdentityRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IdentityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for IdentityRef {
    fn from(value: String) -> Self {
        IdentityRef(value)
    }
}

/// A persisted financial profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Store-assigned key. Immutable once created.
    pub id: i64,
    /// Foreign reference to the identity provider's handle.
    pub identity_ref: IdentityRef,
    pub full_name: String,
    pub country: String,
    pub contact_number: String,
    pub email: String,
    /// Derived once from `country` at creation; never recomputed.
    pub currency: Currency,
    pub account_number: AccountNumber,
    /// Always denominated in `currency`. Zero at creation; no code path
    /// mutates it yet.
    pub balance: Balance,
    pub created_at: DateTime<Utc>,
}

/// Input to `ProfileStore::create_profile`. The store assigns `id` and
/// `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub identity_ref: IdentityRef,
    pub full_name: String,
    pub country: String,
    pub contact_number: String,
    pub email: String,
    pub currency: Currency,
    pub account_number: AccountNumber,
    pub balance: Balance,
}
