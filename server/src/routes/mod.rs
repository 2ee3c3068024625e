//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! JSON auth endpoints for the login form, the two guarded back-office
//! layouts, the access-denied page and the donation payment-intent endpoint,
//! all under a single Axum router with request tracing.

pub mod areas;
pub mod auth;
pub mod payments;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/session", get(auth::current))
        .route("/admin", get(areas::admin))
        .route("/admin/{*rest}", get(areas::admin))
        .route("/dashboard", get(areas::dashboard))
        .route("/dashboard/{*rest}", get(areas::dashboard))
        .route("/access-denied", get(areas::access_denied))
        .route("/api/create-payment-intent", post(payments::create_payment_intent))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "test_support_test.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
