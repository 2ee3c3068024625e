//! Persisted session record.
//!
//! DESIGN
//! ======
//! Records are always written in one camelCase shape. Reading is lenient:
//! blobs written by older front ends used `id`/`name`/`timestamp` and
//! either a single `role` or a `roles` list, and those still decode.

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

use crate::credentials::Principal;
use crate::role::Role;

/// Who is logged in, as persisted in the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub subject_id: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub issued_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<OffsetDateTime>,
}

impl SessionRecord {
    /// Stamp a fresh record for `principal` issued at `now`.
    #[must_use]
    pub fn issue(principal: &Principal, now: OffsetDateTime, ttl: Option<Duration>) -> Self {
        Self {
            subject_id: principal.subject_id.clone(),
            email: principal.email.clone(),
            display_name: principal.display_name.clone(),
            role: principal.role,
            issued_at: now,
            expires_at: ttl.map(|ttl| now + ttl),
        }
    }

    #[must_use]
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }

    #[must_use]
    pub fn principal(&self) -> Principal {
        Principal {
            subject_id: self.subject_id.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            role: self.role,
        }
    }
}

// =============================================================================
// LENIENT DECODING
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("session blob is not a JSON object: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("session blob has an unparseable {field} timestamp")]
    Timestamp { field: &'static str },
}

/// Any historical session blob shape, before role resolution.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredSession {
    #[serde(default, alias = "id")]
    pub subject_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "name")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
    #[serde(default, alias = "timestamp")]
    pub issued_at: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
}

impl StoredSession {
    pub(crate) fn decode(raw: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Highest recognized role named by either `role` or `roles`.
    pub(crate) fn role(&self) -> Option<Role> {
        Role::highest(self.roles.iter().flatten().map(String::as_str).chain(self.role.as_deref()))
    }

    pub(crate) fn expires_at(&self) -> Result<Option<OffsetDateTime>, RecordError> {
        parse_timestamp(self.expires_at.as_deref(), "expiresAt")
    }

    pub(crate) fn issued_at(&self) -> Result<Option<OffsetDateTime>, RecordError> {
        parse_timestamp(self.issued_at.as_deref(), "issuedAt")
    }

    /// Normalize into a [`SessionRecord`]. Returns `None` when the blob has no
    /// recognized role or an unparseable expiry. A missing or unparseable
    /// issue time reads as the Unix epoch.
    pub(crate) fn into_record(self) -> Option<SessionRecord> {
        let role = self.role()?;
        let issued_at = self
            .issued_at()
            .ok()
            .flatten()
            .unwrap_or(OffsetDateTime::UNIX_EPOCH);
        let expires_at = self.expires_at().ok()?;
        Some(SessionRecord {
            subject_id: self.subject_id.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            display_name: self.display_name.unwrap_or_default(),
            role,
            issued_at,
            expires_at,
        })
    }
}

fn parse_timestamp(raw: Option<&str>, field: &'static str) -> Result<Option<OffsetDateTime>, RecordError> {
    raw.map(|s| OffsetDateTime::parse(s, &Rfc3339).map_err(|_| RecordError::Timestamp { field }))
        .transpose()
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
