//! Cookie-backed session storage and the per-request auth gate.
//!
//! ARCHITECTURE
//! ============
//! The session blob lives in the `adminAuth` cookie. Each request gets its
//! own [`gate::AuthGate`] over a [`CookieStorage`] built from the request's
//! cookie jar; after `login`/`logout` the mutated jar is returned with the
//! response. Cookie values are hex-encoded JSON so the blob survives cookie
//! value restrictions (quotes, commas, semicolons).

use std::convert::Infallible;
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::FromRef;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use gate::{AuthGate, CredentialVerifier, SessionBackend, SessionStore, StoreError};
use time::Duration;

use crate::state::AppState;

pub type Gate = AuthGate<CookieStorage, Arc<dyn CredentialVerifier>>;

// =============================================================================
// COOKIE STORAGE
// =============================================================================

pub struct CookieStorage {
    jar: Mutex<CookieJar>,
    secure: bool,
    max_age: Option<Duration>,
}

impl CookieStorage {
    #[must_use]
    pub fn new(jar: CookieJar, secure: bool) -> Self {
        Self { jar: Mutex::new(jar), secure, max_age: None }
    }

    #[must_use]
    pub fn with_max_age(mut self, max_age: Option<Duration>) -> Self {
        self.max_age = max_age;
        self
    }

    #[must_use]
    pub fn into_jar(self) -> CookieJar {
        self.jar.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, cookie: Cookie<'static>) {
        let mut jar = self.jar.lock().unwrap_or_else(PoisonError::into_inner);
        *jar = jar.clone().add(cookie);
    }

    fn build(&self, key: &str, value: String) -> Cookie<'static> {
        let mut cookie = Cookie::build((key.to_owned(), value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build();
        if let Some(max_age) = self.max_age {
            cookie.set_max_age(max_age);
        }
        cookie
    }
}

#[async_trait::async_trait]
impl SessionBackend for CookieStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let jar = self.jar.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(jar
            .get(key)
            .map(Cookie::value)
            .filter(|value| !value.is_empty())
            .map(decode_value))
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StoreError> {
        let cookie = self.build(key, encode_value(&value));
        self.update(cookie);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let mut cookie = self.build(key, String::new());
        cookie.set_max_age(Duration::ZERO);
        self.update(cookie);
        Ok(())
    }
}

pub(crate) fn encode_value(json: &str) -> String {
    hex::encode(json)
}

/// Values that are not hex-encoded UTF-8 are passed through untouched so the
/// resolver sees them as malformed blobs.
pub(crate) fn decode_value(raw: &str) -> String {
    hex::decode(raw)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| raw.to_owned())
}

// =============================================================================
// EXTRACTOR
// =============================================================================

/// Resolved auth gate for the current request. Never rejects: a visitor
/// without a valid session gets a gate in the `Unauthenticated` state.
pub struct GateSession(pub Gate);

impl<S> axum::extract::FromRequestParts<S> for GateSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let storage = CookieStorage::new(CookieJar::from_headers(&parts.headers), app_state.config.cookie_secure)
            .with_max_age(app_state.config.session_ttl);
        let mut gate = AuthGate::new(SessionStore::new(storage), Arc::clone(&app_state.credentials))
            .with_session_ttl(app_state.config.session_ttl);
        gate.resolve().await;
        Ok(Self(gate))
    }
}

/// Cookie jar carrying whatever the gate wrote, for the response.
#[must_use]
pub fn into_jar(gate: Gate) -> CookieJar {
    gate.into_store().into_backend().into_jar()
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
