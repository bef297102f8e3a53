// --- File: crates/banklink_finicity/src/routes.rs ---

use crate::client::FinicityClient;
use crate::error::FinicityError;
use crate::handlers::{
    connect_url_handler, consent_handler, create_customer_handler, customer_accounts_handler,
    FinicityState,
};
use axum::{
    routing::{get, post},
    Router,
};
use banklink_common::method_not_allowed;
use banklink_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing all routes for the Finicity feature.
///
/// Builds the Finicity client from the config and environment credentials;
/// fails when the finicity config section or the credentials are missing.
pub fn routes(config: Arc<AppConfig>) -> Result<Router, FinicityError> {
    let finicity_config = config.finicity.as_ref().ok_or_else(|| {
        FinicityError::ConfigError("finicity section missing from configuration".to_string())
    })?;
    let client = FinicityClient::new(finicity_config)?;
    Ok(routes_with_client(config.clone(), Arc::new(client)))
}

/// Creates the router over an explicit client. Tests use this to point the
/// handlers at a stub server.
pub fn routes_with_client(config: Arc<AppConfig>, client: Arc<FinicityClient>) -> Router {
    let state = Arc::new(FinicityState { config, client });

    Router::new()
        .route(
            "/finicity/customers",
            post(create_customer_handler).fallback(method_not_allowed),
        )
        .route(
            "/finicity/connect-url",
            post(connect_url_handler).fallback(method_not_allowed),
        )
        .route(
            "/finicity/accounts/{customer_id}",
            get(customer_accounts_handler).fallback(method_not_allowed),
        )
        .route(
            "/finicity/consent",
            post(consent_handler).fallback(method_not_allowed),
        )
        .with_state(state)
}
