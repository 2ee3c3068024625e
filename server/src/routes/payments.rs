//! Donation payment-intent route.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::payments::{CreatePaymentIntentRequest, CreatePaymentIntentResponse, PaymentError};
use crate::state::AppState;

const INVALID_BODY: &str = "Invalid request body";

/// `POST /api/create-payment-intent` — validate the donation and ask the
/// provider for a client secret.
pub async fn create_payment_intent(
    State(state): State<AppState>,
    body: Result<Json<CreatePaymentIntentRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "unreadable payment intent request");
            return error_response(rejection.status(), INVALID_BODY);
        }
    };
    let params = match body.validate() {
        Ok(params) => params,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    let Some(payments) = &state.payments else {
        return error_response(StatusCode::SERVICE_UNAVAILABLE, "Payments not configured");
    };

    match payments.create(&params).await {
        Ok(intent) => Json(CreatePaymentIntentResponse { client_secret: intent.client_secret }).into_response(),
        Err(e) => {
            log_provider_error(&e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Error creating payment intent")
        }
    }
}

fn log_provider_error(e: &PaymentError) {
    match e {
        PaymentError::ApiResponse { status, body } => {
            tracing::error!(status, body = %body, "payment provider rejected intent");
        }
        other => tracing::error!(error = %other, "error creating payment intent"),
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
#[path = "payments_test.rs"]
mod tests;
