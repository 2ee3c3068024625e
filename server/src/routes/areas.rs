//! Guarded back-office layouts and the access-denied page.
//!
//! Each handler runs the area's [`RouteGuard`] against the request's
//! resolved gate. Denied visitors get a `303 See Other` to the guard's
//! destination, with the access-denied panel as the body for clients that
//! render before following the redirect.

use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Json, Response};
use gate::guard::{ADMIN_GUARD, DASHBOARD_GUARD, GuardDecision, Panel};
use gate::RouteGuard;

use crate::session::{Gate, GateSession};

/// `GET /admin` and everything below it.
pub async fn admin(GateSession(gate): GateSession, uri: Uri) -> Response {
    guarded(&ADMIN_GUARD, &gate, uri.path())
}

/// `GET /dashboard` and everything below it.
pub async fn dashboard(GateSession(gate): GateSession, uri: Uri) -> Response {
    guarded(&DASHBOARD_GUARD, &gate, uri.path())
}

/// `GET /access-denied`
pub async fn access_denied() -> Response {
    (StatusCode::FORBIDDEN, Json(Panel::access_denied())).into_response()
}

fn guarded(guard: &RouteGuard, gate: &Gate, path: &str) -> Response {
    let decision = guard.decide(gate.status(), path);
    if let GuardDecision::Redirect { to, .. } = decision {
        tracing::info!(path, to, "redirecting unauthorized visitor");
        return (StatusCode::SEE_OTHER, [(header::LOCATION, to)], Json(decision)).into_response();
    }
    Json(decision).into_response()
}

#[cfg(test)]
#[path = "areas_test.rs"]
mod tests;
