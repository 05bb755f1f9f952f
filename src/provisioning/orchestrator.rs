//! Provisioning Orchestrator
//!
//! Drives the two-system account creation saga: identity credentials at the
//! external provider, then the financial profile in the local store, with a
//! compensating identity delete when the store side fails. This is the one
//! place in the system with a full failure-handling contract: every exit
//! path is classified, and a failed compensation is distinguishable from
//! the failure it compensated for.

use std::sync::Arc;

use crate::domain::{
    AccountNumber, Balance, Currency, IdentityRef, NewProfile, OperationContext, UserProfile,
};
use crate::identity::{IdentityHandle, IdentityProvider};
use crate::store::{ProfileStore, StoreError};

use super::error::classify_identity_failure;
use super::{Provisioned, ProvisioningError, RegisterCommand, SignupCommand};

/// Upper bound on account-number regeneration after write-time collisions.
/// Exhausting it means something is operationally wrong (a collision storm
/// is not expected at 9 million possible numbers).
const MAX_ACCOUNT_NUMBER_ATTEMPTS: u32 = 5;

/// Orchestrates account provisioning across the identity provider and the
/// profile store.
///
/// Both gateways are injected once at process start; per-call state is
/// entirely local, so concurrent provisioning calls are independent.
pub struct Provisioner {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn ProfileStore>,
}

impl Provisioner {
    pub fn new(identity: Arc<dyn IdentityProvider>, store: Arc<dyn ProfileStore>) -> Self {
        Self { identity, store }
    }

    /// Provision a new account end to end.
    ///
    /// Sequence: validate → resolve currency → create identity → persist
    /// profile (regenerating the account number on collision) → on store
    /// failure, compensate by deleting the identity. The three remote calls
    /// are strictly sequential; the profile references the identity handle,
    /// so nothing can run speculatively.
    pub async fn signup(
        &self,
        command: SignupCommand,
        context: &OperationContext,
    ) -> Result<Provisioned, ProvisioningError> {
        require(&command.full_name, "fullName")?;
        require(&command.country, "country")?;
        require(&command.contact_number, "contactNumber")?;
        require(&command.email, "email")?;
        require(&command.password, "password")?;

        let currency = Currency::for_country(&command.country);

        let handle = self
            .identity
            .create_identity(&command.email, &command.password)
            .await
            .map_err(classify_identity_failure)?;

        tracing::info!(
            uid = %handle.uid,
            correlation_id = ?context.correlation_id,
            "identity created, persisting profile"
        );

        let profile = match self
            .persist_profile(
                handle.uid.clone(),
                command.full_name,
                command.country,
                command.contact_number,
                command.email,
                currency,
            )
            .await
        {
            Ok(profile) => profile,
            Err(cause) => return Err(self.compensate(handle, cause, context).await),
        };

        tracing::info!(
            profile_id = profile.id,
            account_number = %profile.account_number,
            currency = %profile.currency,
            "account provisioned"
        );

        Ok(Provisioned { profile, handle })
    }

    /// Create a profile for an identity that already exists at the provider.
    ///
    /// Shares validation, currency derivation and the account-number retry
    /// loop with the full saga, but performs no compensation: no identity
    /// was created here, so there is nothing to undo.
    pub async fn register_profile(
        &self,
        command: RegisterCommand,
        context: &OperationContext,
    ) -> Result<UserProfile, ProvisioningError> {
        require(command.identity_ref.as_str(), "identityRef")?;
        require(&command.full_name, "fullName")?;
        require(&command.country, "country")?;
        require(&command.contact_number, "contactNumber")?;
        require(&command.email, "email")?;

        let currency = Currency::for_country(&command.country);

        let profile = self
            .persist_profile(
                command.identity_ref,
                command.full_name,
                command.country,
                command.contact_number,
                command.email,
                currency,
            )
            .await
            .map_err(|cause| match cause {
                StoreError::DuplicateEmail | StoreError::DuplicateIdentityRef => {
                    ProvisioningError::DuplicateProfile
                }
                other => ProvisioningError::ProvisioningFailed { cause: other },
            })?;

        tracing::info!(
            profile_id = profile.id,
            correlation_id = ?context.correlation_id,
            "profile registered for existing identity"
        );

        Ok(profile)
    }

    /// Persist the profile, regenerating the account number on write-time
    /// collision up to a fixed bound. Every other store failure is returned
    /// to the caller unchanged.
    async fn persist_profile(
        &self,
        identity_ref: IdentityRef,
        full_name: String,
        country: String,
        contact_number: String,
        email: String,
        currency: Currency,
    ) -> Result<UserProfile, StoreError> {
        for attempt in 1..=MAX_ACCOUNT_NUMBER_ATTEMPTS {
            let account_number = AccountNumber::generate();

            match self
                .store
                .create_profile(NewProfile {
                    identity_ref: identity_ref.clone(),
                    full_name: full_name.clone(),
                    country: country.clone(),
                    contact_number: contact_number.clone(),
                    email: email.clone(),
                    currency,
                    account_number,
                    balance: Balance::zero(),
                })
                .await
            {
                Err(StoreError::DuplicateAccountNumber) => {
                    tracing::warn!(attempt, "account number collision, regenerating");
                }
                other => return other,
            }
        }

        tracing::error!(
            attempts = MAX_ACCOUNT_NUMBER_ATTEMPTS,
            "account number collisions exhausted retry budget"
        );
        Err(StoreError::DuplicateAccountNumber)
    }

    /// Compensating action: delete the identity created earlier in the saga
    /// and classify the terminal outcome.
    async fn compensate(
        &self,
        handle: IdentityHandle,
        cause: StoreError,
        context: &OperationContext,
    ) -> ProvisioningError {
        match self.identity.delete_identity(&handle).await {
            Ok(()) => {
                tracing::warn!(
                    uid = %handle.uid,
                    %cause,
                    correlation_id = ?context.correlation_id,
                    "profile persistence failed, identity deleted"
                );
                ProvisioningError::ProvisioningFailed { cause }
            }
            Err(compensation) => {
                // The one state where the two systems are allowed to be
                // inconsistent. Logged for operator reconciliation.
                tracing::error!(
                    uid = %handle.uid,
                    %cause,
                    %compensation,
                    correlation_id = ?context.correlation_id,
                    "compensation failed: identity orphaned"
                );
                ProvisioningError::OrphanedIdentity {
                    identity_ref: handle.uid,
                    cause,
                    compensation,
                }
            }
        }
    }
}

/// Fail fast on a missing required field, before any side effect.
fn require(value: &str, field: &'static str) -> Result<(), ProvisioningError> {
    if value.trim().is_empty() {
        return Err(ProvisioningError::Validation { field });
    }
    Ok(())
}
