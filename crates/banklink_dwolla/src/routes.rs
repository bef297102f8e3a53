// --- File: crates/banklink_dwolla/src/routes.rs ---

use crate::client::DwollaClient;
use crate::error::DwollaError;
use crate::handlers::{
    create_customer_handler, create_exchange_handler, create_external_party_handler,
    create_funding_source_handler, create_on_demand_authorization_handler,
    link_funding_source_handler, list_exchange_partners_handler, DwollaState,
};
use axum::{
    routing::{get, post},
    Router,
};
use banklink_common::method_not_allowed;
use banklink_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing all routes for the Dwolla platform feature.
///
/// Builds the platform client from the config and environment credentials;
/// fails when the dwolla config section or the credentials are missing.
pub fn routes(config: Arc<AppConfig>) -> Result<Router, DwollaError> {
    let dwolla_config = config.dwolla.as_ref().ok_or_else(|| {
        DwollaError::ConfigError("dwolla section missing from configuration".to_string())
    })?;
    let client = DwollaClient::new(dwolla_config)?;
    Ok(routes_with_client(config.clone(), Arc::new(client)))
}

/// Creates the router over an explicit client. Tests use this to point the
/// handlers at a stub server.
pub fn routes_with_client(config: Arc<AppConfig>, client: Arc<DwollaClient>) -> Router {
    let state = Arc::new(DwollaState { config, client });

    Router::new()
        .route(
            "/dwolla/customers",
            post(create_customer_handler).fallback(method_not_allowed),
        )
        .route(
            "/dwolla/external-parties",
            post(create_external_party_handler).fallback(method_not_allowed),
        )
        .route(
            "/dwolla/exchange-partners",
            get(list_exchange_partners_handler).fallback(method_not_allowed),
        )
        .route(
            "/dwolla/exchanges",
            post(create_exchange_handler).fallback(method_not_allowed),
        )
        .route(
            "/dwolla/funding-sources",
            post(create_funding_source_handler).fallback(method_not_allowed),
        )
        .route(
            "/dwolla/link-funding-source",
            post(link_funding_source_handler).fallback(method_not_allowed),
        )
        .route(
            "/dwolla/on-demand-authorizations",
            post(create_on_demand_authorization_handler).fallback(method_not_allowed),
        )
        .with_state(state)
}
