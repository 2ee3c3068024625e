//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! carries configuration and the two pluggable capabilities: the credential
//! verifier behind login and the optional payment-intent provider. Sessions
//! themselves live in the client's cookie, so there is no per-session state
//! here.

use std::sync::Arc;

use gate::CredentialVerifier;

use crate::config::ServerConfig;
use crate::payments::PaymentIntents;

/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub credentials: Arc<dyn CredentialVerifier>,
    /// `None` if payment env vars are not configured.
    pub payments: Option<Arc<dyn PaymentIntents>>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: ServerConfig,
        credentials: Arc<dyn CredentialVerifier>,
        payments: Option<Arc<dyn PaymentIntents>>,
    ) -> Self {
        Self { config: Arc::new(config), credentials, payments }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
