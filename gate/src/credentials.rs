//! Credential verification.
//!
//! The gate only sees the [`CredentialVerifier`] capability. The bundled
//! [`StaticCredentials`] is an in-memory table with plain-text passwords and
//! stands in for an identity provider.

use std::sync::Arc;

use serde::Serialize;

use crate::role::Role;

/// An authenticated actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub subject_id: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The identity provider could not be reached.
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Checks an email/password pair against some identity source.
#[async_trait::async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Return the matching principal, or `None` if the pair is not known.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError`] when the check itself could not be made.
    async fn verify(&self, email: &str, password: &str) -> Result<Option<Principal>, CredentialError>;
}

#[async_trait::async_trait]
impl<T: CredentialVerifier + ?Sized> CredentialVerifier for Arc<T> {
    async fn verify(&self, email: &str, password: &str) -> Result<Option<Principal>, CredentialError> {
        (**self).verify(email, password).await
    }
}

// =============================================================================
// STATIC TABLE
// =============================================================================

#[derive(Debug, Clone)]
pub struct KnownPrincipal {
    pub principal: Principal,
    pub password: String,
}

impl KnownPrincipal {
    #[must_use]
    pub fn new(subject_id: &str, email: &str, password: &str, display_name: &str, role: Role) -> Self {
        Self {
            principal: Principal {
                subject_id: subject_id.to_owned(),
                email: email.to_owned(),
                display_name: display_name.to_owned(),
                role,
            },
            password: password.to_owned(),
        }
    }
}

/// Fixed credential table.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    known: Vec<KnownPrincipal>,
}

impl StaticCredentials {
    #[must_use]
    pub fn new(known: Vec<KnownPrincipal>) -> Self {
        Self { known }
    }

    /// The two back-office accounts: one admin, one editor.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(vec![
            KnownPrincipal::new("1", "admin@adfel.org", "admin123", "Admin User", Role::Admin),
            KnownPrincipal::new("2", "editor@adfel.org", "editor123", "Editor User", Role::Editor),
        ])
    }

    /// Synchronous lookup. Emails match case-insensitively after trimming;
    /// passwords must match exactly.
    #[must_use]
    pub fn lookup(&self, email: &str, password: &str) -> Option<&Principal> {
        let email = email.trim();
        self.known
            .iter()
            .find(|k| k.principal.email.eq_ignore_ascii_case(email) && k.password == password)
            .map(|k| &k.principal)
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::demo()
    }
}

#[async_trait::async_trait]
impl CredentialVerifier for StaticCredentials {
    async fn verify(&self, email: &str, password: &str) -> Result<Option<Principal>, CredentialError> {
        Ok(self.lookup(email, password).cloned())
    }
}

#[cfg(test)]
#[path = "credentials_test.rs"]
mod tests;
