// --- File: crates/banklink_plaid/src/routes.rs ---

use crate::error::PlaidError;
use crate::handlers::{create_link_token_handler, exchange_public_token_handler, PlaidState};
use crate::logic::PlaidClient;
use axum::{routing::post, Router};
use banklink_common::method_not_allowed;
use banklink_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing all routes for the Plaid feature.
///
/// Builds the Plaid client from the config and environment credentials; fails
/// when the plaid config section or the credentials are missing.
pub fn routes(config: Arc<AppConfig>) -> Result<Router, PlaidError> {
    let plaid_config = config.plaid.as_ref().ok_or_else(|| {
        PlaidError::ConfigError("plaid section missing from configuration".to_string())
    })?;
    let client = PlaidClient::new(plaid_config)?;
    Ok(routes_with_client(config.clone(), Arc::new(client)))
}

/// Creates the router over an explicit client. Tests use this to point the
/// handlers at a stub server.
pub fn routes_with_client(config: Arc<AppConfig>, client: Arc<PlaidClient>) -> Router {
    let state = Arc::new(PlaidState { config, client });

    Router::new()
        .route(
            "/plaid/create-link-token",
            post(create_link_token_handler).fallback(method_not_allowed),
        )
        .route(
            "/plaid/exchange-public-token",
            post(exchange_public_token_handler).fallback(method_not_allowed),
        )
        .with_state(state)
}
