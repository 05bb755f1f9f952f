//! Profile Store Gateway
//!
//! Create/read operations against the relational profile store. The
//! provisioning and lookup layers depend on this trait only; the Postgres
//! implementation is wired in once at process start.

mod postgres;

pub use postgres::PgProfileStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{IdentityRef, NewProfile, UserProfile};

/// Errors surfaced by the profile store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The generated account number is already taken; callers retry with a
    /// freshly generated number.
    #[error("Account number already in use")]
    DuplicateAccountNumber,

    /// A profile already exists for this email.
    #[error("A profile already exists for this email")]
    DuplicateEmail,

    /// A profile already exists for this identity.
    #[error("A profile already exists for this identity")]
    DuplicateIdentityRef,

    /// Transient store failure; the whole operation is safe to retry.
    #[error("Profile store unavailable: {0}")]
    Unavailable(String),

    /// A persisted row failed domain validation on read.
    #[error("Corrupt profile record: {0}")]
    Corrupt(String),
}

/// Relational store capability for financial profiles.
///
/// No update or delete operations exist; profiles are written exactly once
/// by provisioning.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Persist a new profile. The store assigns `id` and `created_at`.
    async fn create_profile(&self, profile: NewProfile) -> Result<UserProfile, StoreError>;

    /// Fetch a profile by email. Absence is not an error.
    async fn profile_by_email(&self, email: &str) -> Result<Option<UserProfile>, StoreError>;

    /// Fetch a profile by store id. Absence is not an error.
    async fn profile_by_id(&self, id: i64) -> Result<Option<UserProfile>, StoreError>;

    /// Fetch a profile by its identity-provider reference. Absence is not
    /// an error.
    async fn profile_by_identity(
        &self,
        identity_ref: &IdentityRef,
    ) -> Result<Option<UserProfile>, StoreError>;
}
