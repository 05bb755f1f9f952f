//! Command definitions
//!
//! Commands represent intentions to provision state, and the results a
//! successful run produces.

use serde::{Deserialize, Serialize};

use crate::domain::{IdentityRef, UserProfile};
use crate::identity::IdentityHandle;

/// Command to provision a new account end to end: identity credentials at
/// the provider plus the local financial profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupCommand {
    pub full_name: String,
    pub country: String,
    pub contact_number: String,
    pub email: String,
    pub password: String,
}

impl SignupCommand {
    pub fn new(
        full_name: impl Into<String>,
        country: impl Into<String>,
        contact_number: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            country: country.into(),
            contact_number: contact_number.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Command to create a profile for an identity that already exists at the
/// provider (the store-only path behind `POST /api/users/register`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterCommand {
    pub identity_ref: IdentityRef,
    pub full_name: String,
    pub country: String,
    pub contact_number: String,
    pub email: String,
}

impl RegisterCommand {
    pub fn new(
        identity_ref: IdentityRef,
        full_name: impl Into<String>,
        country: impl Into<String>,
        contact_number: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            identity_ref,
            full_name: full_name.into(),
            country: country.into(),
            contact_number: contact_number.into(),
            email: email.into(),
        }
    }
}

/// Result of a successful provisioning run.
#[derive(Debug, Clone)]
pub struct Provisioned {
    /// The persisted financial profile.
    pub profile: UserProfile,
    /// The live identity handle created in step one of the saga.
    pub handle: IdentityHandle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_command() {
        let cmd = SignupCommand::new(
            "Amina Yusuf",
            "NG",
            "+2348012345678",
            "amina@example.com",
            "correct horse battery staple",
        );

        assert_eq!(cmd.country, "NG");
        assert_eq!(cmd.email, "amina@example.com");
    }

    #[test]
    fn test_register_command() {
        let cmd = RegisterCommand::new(
            IdentityRef("uid-1".to_string()),
            "Amina Yusuf",
            "NG",
            "+2348012345678",
            "amina@example.com",
        );

        assert_eq!(cmd.identity_ref.as_str(), "uid-1");
    }
}
