//! Role-gated navigation items for the protected layouts.

use serde::Serialize;

use crate::role::Role;

/// One sidebar entry. `required_role: None` means any authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub title: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
    pub required_role: Option<Role>,
}

impl NavItem {
    const fn any(title: &'static str, href: &'static str, icon: &'static str) -> Self {
        Self { title, href, icon, required_role: None }
    }

    const fn admin(title: &'static str, href: &'static str, icon: &'static str) -> Self {
        Self { title, href, icon, required_role: Some(Role::Admin) }
    }
}

pub const ADMIN_NAVIGATION: &[NavItem] = &[
    NavItem::any("Dashboard", "/admin", "layout-dashboard"),
    NavItem::any("Content", "/admin/content", "file-text"),
    NavItem::any("Events", "/admin/events", "calendar-days"),
    NavItem::admin("Donations", "/admin/donations", "heart"),
    NavItem::admin("Users", "/admin/users", "users"),
    NavItem::admin("Analytics", "/admin/analytics", "bar-chart-3"),
    NavItem::admin("Settings", "/admin/settings", "settings"),
];

pub const DASHBOARD_NAVIGATION: &[NavItem] = &[
    NavItem::any("Dashboard", "/dashboard", "layout-dashboard"),
    NavItem::any("Content", "/dashboard/content", "file-text"),
    NavItem::any("Events", "/dashboard/events", "calendar-days"),
    NavItem::admin("Donations", "/dashboard/donations", "heart"),
    NavItem::admin("Analytics", "/dashboard/analytics", "bar-chart-3"),
    NavItem::admin("Settings", "/dashboard/settings", "settings"),
];

/// Whether `item` is shown to a principal holding `role`.
#[must_use]
pub fn visible(item: &NavItem, role: Role) -> bool {
    item.required_role.map_or(true, |required| role.satisfies(required))
}

/// Items from `items` shown to `role`, in order. Hidden items are dropped.
pub fn filter(items: &[NavItem], role: Role) -> impl Iterator<Item = &NavItem> {
    items.iter().filter(move |item| visible(item, role))
}

#[cfg(test)]
#[path = "nav_test.rs"]
mod tests;
