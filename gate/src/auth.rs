//! Auth gate: the session state machine behind every protected layout.
//!
//! DESIGN
//! ======
//! A gate starts in [`AuthStatus::Loading`] and [`AuthGate::resolve`] moves it
//! exactly once to `Authenticated` or `Unauthenticated`. Later `login` and
//! `logout` calls switch between the two terminal states directly and never
//! return to `Loading`. Every failure while resolving lands in
//! `Unauthenticated`; the gate is never left undecided.
//!
//! The gate does not observe storage changes made elsewhere. A logout in
//! another tab or request only shows up on the next resolve.

use serde::Serialize;
use time::{Duration, OffsetDateTime};

use crate::credentials::{CredentialError, CredentialVerifier, Principal};
use crate::record::SessionRecord;
use crate::resolver::{self, Denial};
use crate::role::Role;
use crate::store::{SessionBackend, SessionStore, StoreError};

/// Message shown on the login form for unknown credentials.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

const LOGIN_UNAVAILABLE: &str = "Unable to sign in right now";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    CredentialMismatch,
    #[error(transparent)]
    Verifier(#[from] CredentialError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    Loading,
    Authenticated(Principal),
    Unauthenticated(Denial),
}

impl AuthStatus {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Authenticated(p) => Some(p),
            Self::Loading | Self::Unauthenticated(_) => None,
        }
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.principal().map(|p| p.role)
    }
}

/// Serializable view of the gate for clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSnapshot {
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub role: Option<Role>,
    pub user: Option<Principal>,
}

/// Result of a login attempt as reported to the login form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoginOutcome {
    #[must_use]
    pub fn from_result<T>(result: &Result<T, AuthError>) -> Self {
        match result {
            Ok(_) => Self { success: true, error: None },
            Err(AuthError::CredentialMismatch) => Self { success: false, error: Some(INVALID_CREDENTIALS.to_owned()) },
            Err(_) => Self { success: false, error: Some(LOGIN_UNAVAILABLE.to_owned()) },
        }
    }
}

// =============================================================================
// GATE
// =============================================================================

pub struct AuthGate<B, V> {
    store: SessionStore<B>,
    verifier: V,
    status: AuthStatus,
    session_ttl: Option<Duration>,
    clock: fn() -> OffsetDateTime,
}

impl<B: SessionBackend, V: CredentialVerifier> AuthGate<B, V> {
    #[must_use]
    pub fn new(store: SessionStore<B>, verifier: V) -> Self {
        Self { store, verifier, status: AuthStatus::Loading, session_ttl: None, clock: OffsetDateTime::now_utc }
    }

    /// Stamp an expiry on records written by [`AuthGate::login`].
    #[must_use]
    pub fn with_session_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.session_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> OffsetDateTime) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn status(&self) -> &AuthStatus {
        &self.status
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore<B> {
        &self.store
    }

    #[must_use]
    pub fn into_store(self) -> SessionStore<B> {
        self.store
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        let user = self.status.principal().cloned();
        AuthSnapshot {
            is_authenticated: user.is_some(),
            is_loading: self.status.is_loading(),
            role: user.as_ref().map(|p| p.role),
            user,
        }
    }

    /// Resolve the stored session. Only the first call out of `Loading` reads
    /// the store; later calls return the current status unchanged.
    pub async fn resolve(&mut self) -> &AuthStatus {
        if self.status.is_loading() {
            self.status = match self.store.read_raw().await {
                Ok(raw) => match resolver::resolve(raw.as_deref(), (self.clock)()) {
                    resolver::Resolution::Authenticated(p) => AuthStatus::Authenticated(p),
                    resolver::Resolution::Unauthenticated(denial) => AuthStatus::Unauthenticated(denial),
                },
                Err(e) => {
                    tracing::warn!(error = %e, "session lookup failed; treating as signed out");
                    AuthStatus::Unauthenticated(Denial::Unavailable)
                }
            };
        }
        &self.status
    }

    /// Check credentials and, on a match, persist a fresh session record.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::CredentialMismatch`] for unknown credentials, or a
    /// verifier/store error if the check or write fails. On any error the
    /// status and the stored blob are left as they were.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Principal, AuthError> {
        let Some(principal) = self.verifier.verify(email, password).await? else {
            tracing::info!("login rejected");
            return Err(AuthError::CredentialMismatch);
        };

        let record = SessionRecord::issue(&principal, (self.clock)(), self.session_ttl);
        self.store.write(&record).await?;

        tracing::info!(subject = %principal.subject_id, role = %principal.role, "login accepted");
        self.status = AuthStatus::Authenticated(principal.clone());
        Ok(principal)
    }

    /// Clear the stored session. Idempotent; a failing store is logged and
    /// the gate still ends `Unauthenticated`.
    pub async fn logout(&mut self) {
        if let Err(e) = self.store.clear().await {
            tracing::warn!(error = %e, "failed to clear stored session");
        }
        self.status = AuthStatus::Unauthenticated(Denial::Absent);
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
