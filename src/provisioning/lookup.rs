//! Profile Lookup Service
//!
//! Read path used after login or session restore. A missing profile is a
//! valid, non-exceptional state (it prompts profile creation), so absence
//! is `None`, never an error.

use std::sync::Arc;

use crate::domain::{IdentityRef, UserProfile};
use crate::store::{ProfileStore, StoreError};

/// Read-through lookup over the profile store.
pub struct ProfileLookup {
    store: Arc<dyn ProfileStore>,
}

impl ProfileLookup {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserProfile>, StoreError> {
        self.store.profile_by_email(email).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserProfile>, StoreError> {
        self.store.profile_by_id(id).await
    }

    /// Lookup by the identity provider's stable uid. Preferred join key for
    /// post-login fetches; email is mutable at the provider.
    pub async fn find_by_identity(
        &self,
        identity_ref: &IdentityRef,
    ) -> Result<Option<UserProfile>, StoreError> {
        self.store.profile_by_identity(identity_ref).await
    }
}
