//! Auth routes: login form submission, logout, session status.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use gate::LoginOutcome;
use gate::auth::AuthError;
use serde::Deserialize;

use crate::session::{self, GateSession};

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

/// `POST /api/auth/login` — check credentials, set the session cookie.
pub async fn login(
    GateSession(mut gate): GateSession,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "unreadable login request");
            let outcome = LoginOutcome::from_result::<()>(&Err(AuthError::CredentialMismatch));
            return (rejection.status(), Json(outcome)).into_response();
        }
    };
    let result = gate.login(&body.email, &body.password).await;
    let outcome = LoginOutcome::from_result(&result);
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(AuthError::CredentialMismatch) => StatusCode::UNAUTHORIZED,
        Err(e) => {
            tracing::error!(error = %e, "login could not complete");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, session::into_jar(gate), Json(outcome)).into_response()
}

/// `POST /api/auth/logout` — clear the session cookie. Safe to repeat.
pub async fn logout(GateSession(mut gate): GateSession) -> Response {
    gate.logout().await;
    (session::into_jar(gate), StatusCode::NO_CONTENT).into_response()
}

/// `GET /api/auth/session` — current gate snapshot.
pub async fn current(GateSession(gate): GateSession) -> Response {
    Json(gate.snapshot()).into_response()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
