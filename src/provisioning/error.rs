//! Provisioning error taxonomy
//!
//! A closed enumeration of provisioning outcomes. Every terminal failure is
//! classified here, with retry-safety documented per kind, so callers never
//! decide retry-or-not by inspecting message strings.

use thiserror::Error;

use crate::domain::IdentityRef;
use crate::identity::IdentityError;
use crate::store::StoreError;

/// Classified failure of a provisioning call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProvisioningError {
    /// Caller input is missing a required field. Surfaced immediately, no
    /// side effects occurred.
    #[error("Missing required field: {field}")]
    Validation { field: &'static str },

    /// The email is already registered with the identity provider.
    /// Surfaced to the caller as "email already in use".
    #[error("An account already exists for this email")]
    DuplicateIdentity,

    /// The password fails the provider's credential policy.
    #[error("Password rejected: {0}")]
    WeakCredential(String),

    /// The identity provider is unreachable. No partial state exists; the
    /// whole call is safe to retry.
    #[error("Identity provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// A profile already exists for this email or identity (store-only
    /// registration path).
    #[error("A profile already exists for this user")]
    DuplicateProfile,

    /// Profile persistence failed and compensation deleted the identity.
    /// System state is clean; the whole call is safe to retry.
    #[error("Provisioning failed: {cause}")]
    ProvisioningFailed { cause: StoreError },

    /// Profile persistence failed and compensation also failed: an identity
    /// now exists with no profile. Not blindly retry-safe; the handle is
    /// carried for operator reconciliation.
    #[error("Orphaned identity {identity_ref}: {cause}; compensation failed: {compensation}")]
    OrphanedIdentity {
        identity_ref: IdentityRef,
        cause: StoreError,
        compensation: IdentityError,
    },
}

impl ProvisioningError {
    /// Whether repeating the whole provisioning call from the top is safe.
    ///
    /// True only where no partial state survives the failure. In particular
    /// `OrphanedIdentity` is excluded: the identity already exists, so a
    /// blind retry would hit `DuplicateIdentity` instead of reconciling.
    pub fn is_retry_safe(&self) -> bool {
        matches!(
            self,
            Self::ProviderUnavailable(_) | Self::ProvisioningFailed { .. }
        )
    }

    /// Whether the failure is the caller's input rather than system state.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::WeakCredential(_)
        )
    }
}

/// Classify a failure of the identity-creation step. No compensation is
/// needed here: nothing was written yet.
pub(crate) fn classify_identity_failure(err: IdentityError) -> ProvisioningError {
    match err {
        IdentityError::DuplicateIdentity => ProvisioningError::DuplicateIdentity,
        IdentityError::WeakCredential(detail) => ProvisioningError::WeakCredential(detail),
        IdentityError::ProviderUnavailable(detail) => {
            ProvisioningError::ProviderUnavailable(detail)
        }
        // Authentication-only variants cannot come out of create_identity;
        // treat a provider that produces them as misbehaving.
        other => ProvisioningError::ProviderUnavailable(other.to_string()),
    }
}
