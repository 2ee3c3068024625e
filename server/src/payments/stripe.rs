//! Stripe payment-intents client.
//!
//! Thin HTTP wrapper for `POST /v1/payment_intents`. Pure form building and
//! response parsing are split out for testability.

use std::time::Duration;

use super::{PaymentError, PaymentIntent, PaymentIntentParams, PaymentIntents};

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com/v1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripeConfig {
    pub secret_key: String,
    pub api_base: String,
    pub request_timeout_secs: u64,
}

impl StripeConfig {
    /// Build typed Stripe config from environment variables.
    ///
    /// Required:
    /// - `STRIPE_SECRET_KEY`
    ///
    /// Optional:
    /// - `STRIPE_API_BASE`: default `https://api.stripe.com/v1`
    /// - `STRIPE_REQUEST_TIMEOUT_SECS`: default 30
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or the timeout does not parse.
    pub fn from_env() -> Result<Self, PaymentError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, PaymentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = lookup("STRIPE_SECRET_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| PaymentError::MissingSecretKey { var: "STRIPE_SECRET_KEY".into() })?;
        let api_base = lookup("STRIPE_API_BASE")
            .unwrap_or_else(|| DEFAULT_API_BASE.to_owned())
            .trim_end_matches('/')
            .to_owned();
        let request_timeout_secs = match lookup("STRIPE_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| PaymentError::ConfigParse(format!("invalid STRIPE_REQUEST_TIMEOUT_SECS: {raw}")))?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        Ok(Self { secret_key, api_base, request_timeout_secs })
    }
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
    endpoint: String,
}

impl StripeClient {
    /// Build a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, PaymentError> {
        Self::new(StripeConfig::from_env()?)
    }

    /// # Errors
    ///
    /// Returns [`PaymentError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: StripeConfig) -> Result<Self, PaymentError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| PaymentError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, secret_key: config.secret_key, endpoint: format!("{}/payment_intents", config.api_base) })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl PaymentIntents for StripeClient {
    async fn create(&self, params: &PaymentIntentParams) -> Result<PaymentIntent, PaymentError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.secret_key)
            .form(&form_fields(params))
            .send()
            .await
            .map_err(|e| PaymentError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| PaymentError::ApiRequest(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(PaymentError::ApiResponse { status, body: text });
        }

        let intent = parse_response(&text)?;
        tracing::info!(intent = %intent.id, amount = params.amount, currency = %params.currency, "payment intent created");
        Ok(intent)
    }
}

// =============================================================================
// WIRE FORMAT
// =============================================================================

/// Stripe's form encoding: flat pairs, metadata as `metadata[key]`.
pub(crate) fn form_fields(params: &PaymentIntentParams) -> Vec<(String, String)> {
    let mut fields = vec![
        ("amount".to_owned(), params.amount.to_string()),
        ("currency".to_owned(), params.currency.clone()),
    ];
    fields.extend(
        params
            .metadata
            .iter()
            .map(|(key, value)| (format!("metadata[{key}]"), value.clone())),
    );
    fields
}

#[derive(serde::Deserialize)]
struct ApiResponse {
    id: String,
    client_secret: Option<String>,
}

fn parse_response(json: &str) -> Result<PaymentIntent, PaymentError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| PaymentError::ApiParse(e.to_string()))?;
    let client_secret = api
        .client_secret
        .ok_or_else(|| PaymentError::ApiParse("response has no client_secret".into()))?;
    Ok(PaymentIntent { id: api.id, client_secret })
}

#[cfg(test)]
#[path = "stripe_test.rs"]
mod tests;
