//! Route guard: what a protected layout shows for a given auth status.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each protected tree (`/admin`, `/dashboard`) owns one [`RouteGuard`]. The
//! guard never renders navigation while the gate is loading or denied, so
//! protected structure is only exposed after authorization is known.

use serde::Serialize;

use crate::auth::AuthStatus;
use crate::nav::{self, ADMIN_NAVIGATION, DASHBOARD_NAVIGATION, NavItem};
use crate::resolver::Denial;
use crate::role::Role;

pub const ACCESS_DENIED_TITLE: &str = "Access Denied";
pub const ACCESS_DENIED_MESSAGE: &str = "You don't have permission to access this area. If you believe this is an error, please contact your administrator.";
const PLEASE_WAIT: &str = "Please wait";

/// Where a denied visitor is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DenyPolicy {
    /// Destination when no session is stored at all.
    pub absent: &'static str,
    /// Destination when a session is stored but does not authorize.
    pub unauthorized: &'static str,
}

impl DenyPolicy {
    #[must_use]
    pub fn destination(&self, denial: Denial) -> &'static str {
        match denial {
            Denial::Absent => self.absent,
            Denial::Malformed | Denial::NoRole | Denial::Expired | Denial::Unavailable => self.unauthorized,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteGuard {
    pub title: &'static str,
    pub home_href: &'static str,
    pub loading_heading: &'static str,
    /// Paths rendered without chrome or auth (the area's own login page).
    pub bare_paths: &'static [&'static str],
    pub deny: DenyPolicy,
    pub navigation: &'static [NavItem],
}

pub const ADMIN_GUARD: RouteGuard = RouteGuard {
    title: "ADFEL Admin",
    home_href: "/admin",
    loading_heading: "Loading admin panel...",
    bare_paths: &["/admin/login"],
    deny: DenyPolicy { absent: "/admin/login", unauthorized: "/admin/login" },
    navigation: ADMIN_NAVIGATION,
};

pub const DASHBOARD_GUARD: RouteGuard = RouteGuard {
    title: "ADFEL Dashboard",
    home_href: "/dashboard",
    loading_heading: "Loading dashboard...",
    bare_paths: &[],
    deny: DenyPolicy { absent: "/", unauthorized: "/access-denied" },
    navigation: DASHBOARD_NAVIGATION,
};

// =============================================================================
// DECISIONS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub title: &'static str,
    pub message: &'static str,
}

impl Panel {
    #[must_use]
    pub fn access_denied() -> Self {
        Self { title: ACCESS_DENIED_TITLE, message: ACCESS_DENIED_MESSAGE }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    pub title: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

/// Full layout chrome for an authorized principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chrome {
    pub title: &'static str,
    pub home_href: &'static str,
    pub role: Role,
    pub role_label: &'static str,
    pub display_name: String,
    pub navigation: Vec<NavLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Auth still resolving: no content, no navigation.
    Placeholder { heading: &'static str, detail: &'static str },
    /// Render page content alone, without layout chrome.
    Bare,
    /// Navigate away. `fallback` is shown until navigation completes.
    Redirect { to: &'static str, fallback: Panel },
    Render(Chrome),
}

impl RouteGuard {
    #[must_use]
    pub fn is_bare(&self, path: &str) -> bool {
        self.bare_paths.iter().any(|bare| *bare == path)
    }

    /// Decide what the layout shows at `path` for `status`.
    #[must_use]
    pub fn decide(&self, status: &AuthStatus, path: &str) -> GuardDecision {
        match status {
            AuthStatus::Loading => GuardDecision::Placeholder { heading: self.loading_heading, detail: PLEASE_WAIT },
            _ if self.is_bare(path) => GuardDecision::Bare,
            AuthStatus::Unauthenticated(denial) => {
                GuardDecision::Redirect { to: self.deny.destination(*denial), fallback: Panel::access_denied() }
            }
            AuthStatus::Authenticated(principal) => GuardDecision::Render(Chrome {
                title: self.title,
                home_href: self.home_href,
                role: principal.role,
                role_label: principal.role.label(),
                display_name: principal.display_name.clone(),
                navigation: self.navigation_for(principal.role, path),
            }),
        }
    }

    /// Navigation visible to `role`, with the entry matching `path` active.
    #[must_use]
    pub fn navigation_for(&self, role: Role, path: &str) -> Vec<NavLink> {
        nav::filter(self.navigation, role)
            .map(|item| NavLink { title: item.title, href: item.href, icon: item.icon, active: item.href == path })
            .collect()
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
