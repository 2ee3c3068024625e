//! Payment-intent creation for the donation form.
//!
//! DESIGN
//! ======
//! The donation UI asks the server for a payment intent and completes the
//! card/PayPal flow client-side with the returned `client_secret`. Request
//! validation lives here; the provider sits behind [`PaymentIntents`] so
//! routes can be tested against a fake.

pub mod stripe;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Smallest accepted donation, in the currency's minor unit.
pub const MIN_AMOUNT: i64 = 100;
pub const DEFAULT_CURRENCY: &str = "usd";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// Amount missing or below [`MIN_AMOUNT`].
    #[error("Invalid amount. Minimum donation is $1.00")]
    InvalidAmount,

    /// The required secret key environment variable is not set.
    #[error("missing payment secret: env var {var} not set")]
    MissingSecretKey { var: String },

    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The HTTP request to the provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be understood.
    #[error("API response parse failed: {0}")]
    ApiParse(String),
}

// =============================================================================
// TYPES
// =============================================================================

/// Body of `POST /api/create-payment-intent`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePaymentIntentRequest {
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    /// `"one-time"`, `"monthly"`, ... recorded as metadata only.
    #[serde(default)]
    pub frequency: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    pub client_secret: String,
}

/// Validated intent parameters handed to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentParams {
    pub amount: i64,
    pub currency: String,
    pub metadata: BTreeMap<&'static str, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

impl CreatePaymentIntentRequest {
    /// Check the amount and fill defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::InvalidAmount`] if the amount is missing or
    /// below [`MIN_AMOUNT`].
    pub fn validate(self) -> Result<PaymentIntentParams, PaymentError> {
        let amount = self
            .amount
            .filter(|amount| *amount >= MIN_AMOUNT)
            .ok_or(PaymentError::InvalidAmount)?;

        let currency = self
            .currency
            .map(|c| c.trim().to_ascii_lowercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_owned());

        let mut metadata = BTreeMap::new();
        if let Some(frequency) = self.frequency {
            if frequency == "monthly" {
                metadata.insert("recurring", "true".to_owned());
            }
            metadata.insert("donation_type", frequency);
        }

        Ok(PaymentIntentParams { amount, currency, metadata })
    }
}

// =============================================================================
// PROVIDER TRAIT
// =============================================================================

/// Provider-neutral async trait for payment intents. Enables mocking in tests.
#[async_trait::async_trait]
pub trait PaymentIntents: Send + Sync {
    /// Create a payment intent and return its client secret.
    ///
    /// # Errors
    ///
    /// Returns a [`PaymentError`] if the provider call fails or its response
    /// is malformed.
    async fn create(&self, params: &PaymentIntentParams) -> Result<PaymentIntent, PaymentError>;
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
