//! REST client for the identity provider
//!
//! Speaks the Identity Toolkit-style HTTP API: `accounts:signUp`,
//! `accounts:signInWithPassword` and `accounts:delete`, authenticated by an
//! API key query parameter. Provider failures arrive as an error envelope
//! with a stable message code; those codes are mapped onto [`IdentityError`]
//! variants here so nothing upstream ever matches on message strings.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::domain::IdentityRef;

use super::{IdentityError, IdentityHandle, IdentityProvider, SessionState};

/// REST-backed identity provider client.
///
/// Constructed once at process start and shared across requests; the inner
/// `reqwest::Client` pools connections.
pub struct RestIdentityProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    sessions: watch::Sender<SessionState>,
}

#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(rename = "returnSecureToken")]
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
struct DeleteRequest<'a> {
    #[serde(rename = "idToken")]
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    #[serde(rename = "localId")]
    local_id: String,
    #[serde(rename = "idToken")]
    id_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl RestIdentityProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let (sessions, _) = watch::channel(SessionState::SignedOut);
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            sessions,
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/v1/accounts:{}?key={}",
            self.base_url.trim_end_matches('/'),
            action,
            self.api_key
        )
    }

    /// POST a credentials payload and decode either a session or a
    /// classified provider error.
    async fn post_credentials(
        &self,
        action: &str,
        email: &str,
        password: &str,
    ) -> Result<IdentityHandle, IdentityError> {
        let response = self
            .http
            .post(self.endpoint(action))
            .json(&CredentialsRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| IdentityError::ProviderUnavailable(e.to_string()))?;

        if response.status().is_success() {
            let session: SessionResponse = response
                .json()
                .await
                .map_err(|e| IdentityError::ProviderUnavailable(e.to_string()))?;
            return Ok(IdentityHandle {
                uid: IdentityRef(session.local_id),
                session_token: session.id_token,
            });
        }

        Err(decode_provider_error(response).await)
    }
}

/// Map the provider's error envelope to a classified error.
async fn decode_provider_error(response: reqwest::Response) -> IdentityError {
    let status = response.status();
    let envelope: Result<ErrorEnvelope, _> = response.json().await;

    let message = match envelope {
        Ok(envelope) => envelope.error.message,
        Err(_) => return IdentityError::ProviderUnavailable(format!("HTTP {}", status)),
    };

    // WEAK_PASSWORD arrives with a human suffix ("WEAK_PASSWORD : ...").
    if let Some(detail) = message.strip_prefix("WEAK_PASSWORD") {
        return IdentityError::WeakCredential(detail.trim_start_matches([' ', ':']).to_string());
    }

    match message.as_str() {
        "EMAIL_EXISTS" => IdentityError::DuplicateIdentity,
        "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => IdentityError::InvalidCredentials,
        "EMAIL_NOT_FOUND" => IdentityError::UnknownIdentity,
        "USER_NOT_FOUND" | "INVALID_ID_TOKEN" => IdentityError::NotFound,
        other => IdentityError::ProviderUnavailable(format!("HTTP {}: {}", status, other)),
    }
}

#[async_trait::async_trait]
impl IdentityProvider for RestIdentityProvider {
    async fn create_identity(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentityHandle, IdentityError> {
        let handle = self.post_credentials("signUp", email, password).await?;
        let _ = self
            .sessions
            .send(SessionState::SignedIn(handle.uid.clone()));
        Ok(handle)
    }

    async fn delete_identity(&self, handle: &IdentityHandle) -> Result<(), IdentityError> {
        let response = self
            .http
            .post(self.endpoint("delete"))
            .json(&DeleteRequest {
                id_token: &handle.session_token,
            })
            .send()
            .await
            .map_err(|e| IdentityError::ProviderUnavailable(e.to_string()))?;

        if response.status().is_success() {
            let _ = self.sessions.send(SessionState::SignedOut);
            return Ok(());
        }

        Err(decode_provider_error(response).await)
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentityHandle, IdentityError> {
        let handle = self
            .post_credentials("signInWithPassword", email, password)
            .await?;
        let _ = self
            .sessions
            .send(SessionState::SignedIn(handle.uid.clone()));
        Ok(handle)
    }

    async fn end_session(&self, _handle: &IdentityHandle) -> Result<(), IdentityError> {
        // The provider's tokens are stateless; ending a session is a local
        // transition.
        let _ = self.sessions.send(SessionState::SignedOut);
        Ok(())
    }

    fn subscribe_sessions(&self) -> watch::Receiver<SessionState> {
        self.sessions.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_format() {
        let provider = RestIdentityProvider::new("https://identity.example.com/", "key-123");
        assert_eq!(
            provider.endpoint("signUp"),
            "https://identity.example.com/v1/accounts:signUp?key=key-123"
        );
    }

    #[tokio::test]
    async fn test_session_subscription_starts_signed_out() {
        let provider = RestIdentityProvider::new("https://identity.example.com", "key");
        let rx = provider.subscribe_sessions();
        assert_eq!(*rx.borrow(), SessionState::SignedOut);
    }

    #[tokio::test]
    async fn test_end_session_broadcasts_signed_out() {
        let provider = RestIdentityProvider::new("https://identity.example.com", "key");
        let mut rx = provider.subscribe_sessions();

        let handle = IdentityHandle {
            uid: IdentityRef("uid-1".to_string()),
            session_token: "token".to_string(),
        };
        provider.end_session(&handle).await.unwrap();

        // watch keeps only the latest value; the state is observable even
        // though it did not change variant.
        assert_eq!(*rx.borrow_and_update(), SessionState::SignedOut);
    }
}
