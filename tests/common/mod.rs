//! Common test utilities
//!
//! In-memory gateway fakes and app-state construction for router-level
//! tests. No database or identity provider is required.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::watch;

use swift_remit::api::AppState;
use swift_remit::domain::{IdentityRef, NewProfile, UserProfile};
use swift_remit::identity::{IdentityError, IdentityHandle, IdentityProvider, SessionState};
use swift_remit::provisioning::{ProfileLookup, Provisioner};
use swift_remit::store::{ProfileStore, StoreError};

/// In-memory identity provider.
pub struct MemoryIdentityProvider {
    /// email -> (password, uid)
    identities: Mutex<HashMap<String, (String, String)>>,
    next_uid: AtomicU64,
    fail_delete: Mutex<Option<IdentityError>>,
    sessions: watch::Sender<SessionState>,
}

impl MemoryIdentityProvider {
    pub fn new() -> Arc<Self> {
        let (sessions, _) = watch::channel(SessionState::SignedOut);
        Arc::new(Self {
            identities: Mutex::new(HashMap::new()),
            next_uid: AtomicU64::new(1),
            fail_delete: Mutex::new(None),
            sessions,
        })
    }

    pub fn inject_delete_failure(&self, err: IdentityError) {
        *self.fail_delete.lock().unwrap() = Some(err);
    }

    pub fn identity_count(&self) -> usize {
        self.identities.lock().unwrap().len()
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn create_identity(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentityHandle, IdentityError> {
        let mut identities = self.identities.lock().unwrap();
        if identities.contains_key(email) {
            return Err(IdentityError::DuplicateIdentity);
        }

        let uid = format!("uid-{}", self.next_uid.fetch_add(1, Ordering::SeqCst));
        identities.insert(email.to_string(), (password.to_string(), uid.clone()));
        drop(identities);

        let _ = self
            .sessions
            .send(SessionState::SignedIn(IdentityRef(uid.clone())));

        Ok(IdentityHandle {
            uid: IdentityRef(uid.clone()),
            session_token: format!("token-{}", uid),
        })
    }

    async fn delete_identity(&self, handle: &IdentityHandle) -> Result<(), IdentityError> {
        if let Some(err) = self.fail_delete.lock().unwrap().take() {
            return Err(err);
        }

        let mut identities = self.identities.lock().unwrap();
        let email = identities
            .iter()
            .find(|(_, (_, uid))| *uid == handle.uid.0)
            .map(|(email, _)| email.clone());

        match email {
            Some(email) => {
                identities.remove(&email);
                Ok(())
            }
            None => Err(IdentityError::NotFound),
        }
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentityHandle, IdentityError> {
        let identities = self.identities.lock().unwrap();
        match identities.get(email) {
            None => Err(IdentityError::UnknownIdentity),
            Some((stored, _)) if stored != password => Err(IdentityError::InvalidCredentials),
            Some((_, uid)) => Ok(IdentityHandle {
                uid: IdentityRef(uid.clone()),
                session_token: format!("token-{}", uid),
            }),
        }
    }

    async fn end_session(&self, _handle: &IdentityHandle) -> Result<(), IdentityError> {
        let _ = self.sessions.send(SessionState::SignedOut);
        Ok(())
    }

    fn subscribe_sessions(&self) -> watch::Receiver<SessionState> {
        self.sessions.subscribe()
    }
}

/// In-memory profile store with failure injection.
pub struct MemoryProfileStore {
    profiles: Mutex<Vec<UserProfile>>,
    next_id: AtomicI64,
    fail_create: Mutex<VecDeque<StoreError>>,
}

impl MemoryProfileStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            profiles: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            fail_create: Mutex::new(VecDeque::new()),
        })
    }

    pub fn inject_create_failures(&self, errors: impl IntoIterator<Item = StoreError>) {
        self.fail_create.lock().unwrap().extend(errors);
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.lock().unwrap().len()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn create_profile(&self, profile: NewProfile) -> Result<UserProfile, StoreError> {
        if let Some(err) = self.fail_create.lock().unwrap().pop_front() {
            return Err(err);
        }

        let mut profiles = self.profiles.lock().unwrap();
        if profiles.iter().any(|p| p.email == profile.email) {
            return Err(StoreError::DuplicateEmail);
        }
        if profiles
            .iter()
            .any(|p| p.identity_ref == profile.identity_ref)
        {
            return Err(StoreError::DuplicateIdentityRef);
        }
        if profiles
            .iter()
            .any(|p| p.account_number == profile.account_number)
        {
            return Err(StoreError::DuplicateAccountNumber);
        }

        let persisted = UserProfile {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            identity_ref: profile.identity_ref,
            full_name: profile.full_name,
            country: profile.country,
            contact_number: profile.contact_number,
            email: profile.email,
            currency: profile.currency,
            account_number: profile.account_number,
            balance: profile.balance,
            created_at: Utc::now(),
        };
        profiles.push(persisted.clone());
        Ok(persisted)
    }

    async fn profile_by_email(&self, email: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.email == email)
            .cloned())
    }

    async fn profile_by_id(&self, id: i64) -> Result<Option<UserProfile>, StoreError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn profile_by_identity(
        &self,
        identity_ref: &IdentityRef,
    ) -> Result<Option<UserProfile>, StoreError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.identity_ref == identity_ref)
            .cloned())
    }
}

/// Build app state over fresh fakes, returning the fakes for injection and
/// inspection.
pub fn test_state() -> (AppState, Arc<MemoryIdentityProvider>, Arc<MemoryProfileStore>) {
    let identity = MemoryIdentityProvider::new();
    let store = MemoryProfileStore::new();

    let state = AppState {
        provisioner: Arc::new(Provisioner::new(identity.clone(), store.clone())),
        lookup: Arc::new(ProfileLookup::new(store.clone())),
        identity: identity.clone(),
    };

    (state, identity, store)
}
