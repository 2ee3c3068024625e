mod config;
mod payments;
mod routes;
mod session;
mod state;

use std::sync::Arc;

use gate::StaticCredentials;

use crate::payments::PaymentIntents;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env().expect("invalid server configuration");
    let port = config.port;

    // Payments are optional: donation checkout is disabled without Stripe config.
    let payments: Option<Arc<dyn PaymentIntents>> = match payments::stripe::StripeClient::from_env() {
        Ok(client) => {
            tracing::info!(endpoint = client.endpoint(), "payment client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "payments not configured, donation checkout disabled");
            None
        }
    };

    if config.session_ttl.is_none() {
        tracing::info!("sessions do not expire; set SESSION_MAX_AGE_SECS to bound them");
    }

    let state = state::AppState::new(config, Arc::new(StaticCredentials::demo()), payments);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "back office listening");
    axum::serve(listener, app).await.expect("server failed");
}
