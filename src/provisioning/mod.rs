//! Account provisioning
//!
//! The core of the service: the orchestrator driving the identity provider
//! and the profile store through the create-with-compensation protocol, the
//! closed error taxonomy of its exits, and the post-login lookup read path.

mod commands;
mod error;
mod lookup;
mod orchestrator;


pub use commands::{Provisioned, RegisterCommand, SignupCommand};
pub use error::ProvisioningError;
pub use lookup::ProfileLookup;
pub use orchestrator::Provisioner;
