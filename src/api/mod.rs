//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod routes;

use std::sync::Arc;

use crate::identity::IdentityProvider;
use crate::provisioning::{ProfileLookup, Provisioner};

pub use routes::create_router;

/// Shared application state: the gateways are constructed once at process
/// start and injected here, so handlers never reach for globals and tests
/// can substitute fakes.
#[derive(Clone)]
pub struct AppState {
    pub provisioner: Arc<Provisioner>,
    pub lookup: Arc<ProfileLookup>,
    pub identity: Arc<dyn IdentityProvider>,
}
