use super::*;
use crate::credentials::Principal;

fn signed_in(role: Role) -> AuthStatus {
    AuthStatus::Authenticated(Principal {
        subject_id: "1".into(),
        email: "someone@adfel.org".into(),
        display_name: "Someone".into(),
        role,
    })
}

fn chrome(decision: GuardDecision) -> Chrome {
    match decision {
        GuardDecision::Render(chrome) => chrome,
        other => panic!("expected render, got {other:?}"),
    }
}

#[test]
fn loading_shows_placeholder_only() {
    for guard in [ADMIN_GUARD, DASHBOARD_GUARD] {
        let decision = guard.decide(&AuthStatus::Loading, guard.home_href);
        assert_eq!(decision, GuardDecision::Placeholder { heading: guard.loading_heading, detail: "Please wait" });
    }
}

#[test]
fn loading_takes_priority_over_bare_path() {
    let decision = ADMIN_GUARD.decide(&AuthStatus::Loading, "/admin/login");
    assert!(matches!(decision, GuardDecision::Placeholder { .. }));
}

#[test]
fn every_denial_redirects_and_never_renders_navigation() {
    let denials = [Denial::Absent, Denial::Malformed, Denial::NoRole, Denial::Expired, Denial::Unavailable];
    for guard in [ADMIN_GUARD, DASHBOARD_GUARD] {
        for denial in denials {
            let decision = guard.decide(&AuthStatus::Unauthenticated(denial), "/admin/users");
            let GuardDecision::Redirect { to, fallback } = decision else {
                panic!("expected redirect for {denial:?}");
            };
            assert_eq!(to, guard.deny.destination(denial));
            assert_eq!(fallback.title, "Access Denied");
        }
    }
}

#[test]
fn admin_denials_go_to_login() {
    let decision = ADMIN_GUARD.decide(&AuthStatus::Unauthenticated(Denial::Absent), "/admin/events");
    assert!(matches!(decision, GuardDecision::Redirect { to: "/admin/login", .. }));
}

#[test]
fn dashboard_denials_split_by_cause() {
    let absent = DASHBOARD_GUARD.decide(&AuthStatus::Unauthenticated(Denial::Absent), "/dashboard");
    assert!(matches!(absent, GuardDecision::Redirect { to: "/", .. }));
    let no_role = DASHBOARD_GUARD.decide(&AuthStatus::Unauthenticated(Denial::NoRole), "/dashboard");
    assert!(matches!(no_role, GuardDecision::Redirect { to: "/access-denied", .. }));
}

#[test]
fn admin_login_page_is_bare_for_everyone() {
    assert_eq!(ADMIN_GUARD.decide(&AuthStatus::Unauthenticated(Denial::Absent), "/admin/login"), GuardDecision::Bare);
    assert_eq!(ADMIN_GUARD.decide(&signed_in(Role::Editor), "/admin/login"), GuardDecision::Bare);
    assert!(!DASHBOARD_GUARD.is_bare("/admin/login"));
}

#[test]
fn admin_role_gets_full_navigation() {
    let chrome = chrome(ADMIN_GUARD.decide(&signed_in(Role::Admin), "/admin/users"));
    assert_eq!(chrome.role, Role::Admin);
    assert_eq!(chrome.role_label, "Administrator");
    assert_eq!(chrome.title, "ADFEL Admin");
    assert_eq!(chrome.navigation.len(), ADMIN_NAVIGATION.len());
    let active: Vec<_> = chrome.navigation.iter().filter(|l| l.active).map(|l| l.href).collect();
    assert_eq!(active, vec!["/admin/users"]);
}

#[test]
fn editor_role_gets_filtered_navigation() {
    let chrome = chrome(DASHBOARD_GUARD.decide(&signed_in(Role::Editor), "/dashboard"));
    assert_eq!(chrome.role_label, "Editor");
    let hrefs: Vec<_> = chrome.navigation.iter().map(|l| l.href).collect();
    assert_eq!(hrefs, vec!["/dashboard", "/dashboard/content", "/dashboard/events"]);
}

#[test]
fn decision_serializes_with_kind_tag() {
    let json = serde_json::to_value(ADMIN_GUARD.decide(&AuthStatus::Unauthenticated(Denial::Absent), "/admin")).unwrap();
    assert_eq!(json["kind"], "redirect");
    assert_eq!(json["to"], "/admin/login");
    assert_eq!(json["fallback"]["title"], "Access Denied");

    let json = serde_json::to_value(ADMIN_GUARD.decide(&signed_in(Role::Editor), "/admin")).unwrap();
    assert_eq!(json["kind"], "render");
    assert_eq!(json["roleLabel"], "Editor");
    assert_eq!(json["navigation"][0]["active"], true);
}
