use super::*;
use axum::extract::FromRequestParts;
use axum::http::{Request, header};
use gate::{AuthStatus, Denial, Role, SessionRecord};
use gate::store::SESSION_KEY;

use crate::config::ServerConfig;
use crate::state::test_helpers;

fn jar_with(raw_value: &str) -> CookieJar {
    CookieJar::new().add(Cookie::new(SESSION_KEY, raw_value.to_owned()))
}

async fn gate_for_cookie(cookie: Option<&str>) -> Gate {
    let mut builder = Request::builder().uri("/admin");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let (mut parts, ()) = builder.body(()).unwrap().into_parts();
    let state = test_helpers::test_app_state();
    let GateSession(gate) = GateSession::from_request_parts(&mut parts, &state).await.unwrap();
    gate
}

// =============================================================================
// value encoding
// =============================================================================

#[test]
fn encode_decode_round_trip() {
    let json = r#"{"role":"admin","name":"A, B; \"C\""}"#;
    let encoded = encode_value(json);
    assert!(encoded.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(decode_value(&encoded), json);
}

#[test]
fn decode_passes_non_hex_through() {
    assert_eq!(decode_value("not-hex"), "not-hex");
    assert_eq!(decode_value("abc"), "abc");
}

#[test]
fn decode_passes_non_utf8_hex_through() {
    assert_eq!(decode_value("ff"), "ff");
}

// =============================================================================
// CookieStorage
// =============================================================================

#[tokio::test]
async fn set_then_get_round_trips() {
    let storage = CookieStorage::new(CookieJar::new(), false);
    storage.set_item(SESSION_KEY, r#"{"role":"editor"}"#.into()).await.unwrap();
    assert_eq!(storage.get_item(SESSION_KEY).await.unwrap().as_deref(), Some(r#"{"role":"editor"}"#));
}

#[tokio::test]
async fn set_writes_hardened_cookie() {
    let storage = CookieStorage::new(CookieJar::new(), true).with_max_age(Some(Duration::hours(1)));
    storage.set_item(SESSION_KEY, "{}".into()).await.unwrap();
    let jar = storage.into_jar();
    let cookie = jar.get(SESSION_KEY).unwrap();
    assert_eq!(cookie.value(), encode_value("{}"));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.max_age(), Some(Duration::hours(1)));
}

#[tokio::test]
async fn remove_expires_cookie_and_reads_absent() {
    let storage = CookieStorage::new(jar_with(&encode_value("{}")), false);
    storage.remove_item(SESSION_KEY).await.unwrap();
    assert_eq!(storage.get_item(SESSION_KEY).await.unwrap(), None);
    let jar = storage.into_jar();
    assert_eq!(jar.get(SESSION_KEY).unwrap().max_age(), Some(Duration::ZERO));
}

#[tokio::test]
async fn missing_cookie_reads_absent() {
    let storage = CookieStorage::new(CookieJar::new(), false);
    assert_eq!(storage.get_item(SESSION_KEY).await.unwrap(), None);
}

// =============================================================================
// GateSession
// =============================================================================

#[tokio::test]
async fn no_cookie_resolves_absent() {
    let gate = gate_for_cookie(None).await;
    assert_eq!(gate.status(), &AuthStatus::Unauthenticated(Denial::Absent));
}

#[tokio::test]
async fn malformed_cookie_resolves_unauthenticated() {
    let gate = gate_for_cookie(Some("adminAuth=garbage")).await;
    assert_eq!(gate.status(), &AuthStatus::Unauthenticated(Denial::Malformed));
    assert!(!gate.snapshot().is_loading);
}

#[tokio::test]
async fn valid_cookie_resolves_role() {
    let value = encode_value(r#"{"subjectId":"1","email":"admin@adfel.org","displayName":"Admin User","role":"admin","issuedAt":"2026-01-01T00:00:00Z"}"#);
    let gate = gate_for_cookie(Some(&format!("adminAuth={value}"))).await;
    assert_eq!(gate.status().role(), Some(Role::Admin));
}

#[tokio::test]
async fn login_writes_cookie_readable_by_next_request() {
    let mut gate = gate_for_cookie(None).await;
    gate.login("editor@adfel.org", "editor123").await.unwrap();
    let jar = into_jar(gate);
    let value = jar.get(SESSION_KEY).unwrap().value().to_owned();

    let next = gate_for_cookie(Some(&format!("adminAuth={value}"))).await;
    assert_eq!(next.status().role(), Some(Role::Editor));
    let record: SessionRecord = serde_json::from_str(&decode_value(&value)).unwrap();
    assert_eq!(record.email, "editor@adfel.org");
}

#[tokio::test]
async fn configured_ttl_reaches_record_and_cookie() {
    let config = ServerConfig { session_ttl: Some(Duration::minutes(30)), ..ServerConfig::default() };
    let state = test_helpers::test_app_state_with_config(config);
    let (mut parts, ()) = Request::builder().body(()).unwrap().into_parts();
    let GateSession(mut gate) = GateSession::from_request_parts(&mut parts, &state).await.unwrap();
    let principal = gate.login("admin@adfel.org", "admin123").await.unwrap();
    assert_eq!(principal.role, Role::Admin);

    let record = gate.store().read().await.unwrap().unwrap();
    assert_eq!(record.expires_at, Some(record.issued_at + Duration::minutes(30)));
    let jar = into_jar(gate);
    assert_eq!(jar.get(SESSION_KEY).unwrap().max_age(), Some(Duration::minutes(30)));
}
