//! Session store accessor over an injected key-value backend.
//!
//! ARCHITECTURE
//! ============
//! The backend trait is async so a network-backed session check can replace
//! the local store without changing [`crate::auth::AuthGate`]. The accessor
//! itself only serializes: it never interprets the stored blob, which is the
//! resolver's job.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::record::{SessionRecord, StoredSession};

/// Fixed storage key holding the session blob.
pub const SESSION_KEY: &str = "adminAuth";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be read or written.
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
    /// The record could not be encoded for storage.
    #[error("failed to encode session record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Minimal key-value surface the session store needs.
#[async_trait::async_trait]
pub trait SessionBackend: Send + Sync {
    /// Fetch the raw value under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the backend cannot be read.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the backend cannot be written.
    async fn set_item(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the backend cannot be written.
    async fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

// =============================================================================
// MEMORY BACKEND
// =============================================================================

/// In-process backend. Used for tests and as a stand-in store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a backend holding one raw value.
    #[must_use]
    pub fn with_item(key: &str, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.items().insert(key.to_owned(), value.into());
        storage
    }

    /// Synchronous peek at a raw value.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.items().get(key).cloned()
    }

    fn items(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.items
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl SessionBackend for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.peek(key))
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.items().insert(key.to_owned(), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.items().remove(key);
        Ok(())
    }
}

// =============================================================================
// ACCESSOR
// =============================================================================

/// Reads, writes and clears the session blob under a fixed key.
pub struct SessionStore<B> {
    backend: B,
    key: String,
}

impl<B: SessionBackend> SessionStore<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, SESSION_KEY)
    }

    #[must_use]
    pub fn with_key(backend: B, key: &str) -> Self {
        Self { backend, key: key.to_owned() }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Serialize and persist `record`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if encoding or the backend write fails.
    pub async fn write(&self, record: &SessionRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string(record)?;
        self.backend.set_item(&self.key, json).await
    }

    /// Raw stored blob, uninterpreted.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend read fails.
    pub async fn read_raw(&self) -> Result<Option<String>, StoreError> {
        self.backend.get_item(&self.key).await
    }

    /// Stored record, or `None` when absent or malformed.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] only if the backend read fails; bad blobs are
    /// reported as absence.
    pub async fn read(&self) -> Result<Option<SessionRecord>, StoreError> {
        let raw = self.read_raw().await?;
        Ok(raw
            .as_deref()
            .and_then(|raw| StoredSession::decode(raw).ok())
            .and_then(StoredSession::into_record))
    }

    /// Remove the stored blob.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend write fails.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.backend.remove_item(&self.key).await
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
