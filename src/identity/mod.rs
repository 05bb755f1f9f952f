//! Identity Gateway
//!
//! Interface to the external identity provider that owns authentication
//! credentials and session issuance. The provisioning layer depends on this
//! trait only, so tests substitute in-memory fakes and the process wires in
//! the REST client once at startup.

mod rest;

pub use rest::RestIdentityProvider;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

use crate::domain::IdentityRef;

/// A live handle to a provider-side identity, as returned by identity
/// creation or authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityHandle {
    /// The provider's stable uid. This is what profiles store as their
    /// foreign key.
    pub uid: IdentityRef,
    /// Short-lived session token; required by the provider for
    /// self-service operations such as identity deletion.
    pub session_token: String,
}

/// Session state transitions observable by UI-layer consumers.
///
/// The provisioning orchestrator never consumes these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    SignedOut,
    SignedIn(IdentityRef),
}

/// Errors surfaced by the identity provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The email is already registered with the provider.
    #[error("An identity already exists for this email")]
    DuplicateIdentity,

    /// The password fails the provider's credential policy.
    #[error("Credential rejected by provider policy: {0}")]
    WeakCredential(String),

    /// Authentication failed: the email exists but the password is wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Authentication failed: no identity exists for the email.
    #[error("No identity exists for this email")]
    UnknownIdentity,

    /// The referenced identity does not exist (deletion path).
    #[error("Identity not found")]
    NotFound,

    /// Transient network or service failure.
    #[error("Identity provider unavailable: {0}")]
    ProviderUnavailable(String),
}

/// External identity provider capability.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create authentication credentials for a new user.
    async fn create_identity(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentityHandle, IdentityError>;

    /// Delete a previously created identity.
    ///
    /// Used only as a compensating action; callers must surface its failure
    /// distinctly from the failure it compensates for.
    async fn delete_identity(&self, handle: &IdentityHandle) -> Result<(), IdentityError>;

    /// Verify credentials and open a session.
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentityHandle, IdentityError>;

    /// Close the session held by `handle`.
    async fn end_session(&self, handle: &IdentityHandle) -> Result<(), IdentityError>;

    /// Observe session state transitions (signed-in / signed-out).
    fn subscribe_sessions(&self) -> watch::Receiver<SessionState>;
}
