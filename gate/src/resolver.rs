//! Classify a raw stored blob as an authenticated principal or not.

use serde::Serialize;
use time::OffsetDateTime;

use crate::credentials::Principal;
use crate::record::StoredSession;

/// Why a visitor is not authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Denial {
    /// No session blob is stored.
    Absent,
    /// The blob is not a decodable session object.
    Malformed,
    /// The blob decodes but carries no recognized role.
    NoRole,
    /// The blob's `expiresAt` has passed.
    Expired,
    /// The store could not be consulted.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Authenticated(Principal),
    Unauthenticated(Denial),
}

impl Resolution {
    #[must_use]
    pub fn role(&self) -> Option<crate::role::Role> {
        match self {
            Self::Authenticated(p) => Some(p.role),
            Self::Unauthenticated(_) => None,
        }
    }
}

/// Resolve a raw stored blob at time `now`.
///
/// A blob authenticates when it decodes, is not expired, and names a
/// recognized role either directly (`role`) or via a `roles` list, where
/// `admin` outranks `editor`.
#[must_use]
pub fn resolve(raw: Option<&str>, now: OffsetDateTime) -> Resolution {
    let Some(raw) = raw else {
        return Resolution::Unauthenticated(Denial::Absent);
    };

    let stored = match StoredSession::decode(raw) {
        Ok(stored) => stored,
        Err(e) => {
            tracing::debug!(error = %e, "ignoring malformed session blob");
            return Resolution::Unauthenticated(Denial::Malformed);
        }
    };

    match stored.expires_at() {
        Ok(Some(exp)) if exp <= now => return Resolution::Unauthenticated(Denial::Expired),
        Ok(_) => {}
        Err(e) => {
            tracing::debug!(error = %e, "ignoring session blob with bad expiry");
            return Resolution::Unauthenticated(Denial::Malformed);
        }
    }

    let Some(role) = stored.role() else {
        return Resolution::Unauthenticated(Denial::NoRole);
    };

    Resolution::Authenticated(Principal {
        subject_id: stored.subject_id.unwrap_or_default(),
        email: stored.email.unwrap_or_default(),
        display_name: stored.display_name.unwrap_or_default(),
        role,
    })
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
