// --- File: crates/banklink_mx/src/routes.rs ---

use crate::client::MxClient;
use crate::error::MxError;
use crate::handlers::{
    authorization_code_handler, create_user_handler, verified_accounts_handler,
    widget_url_handler, MxState,
};
use axum::{
    routing::{get, post},
    Router,
};
use banklink_common::method_not_allowed;
use banklink_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing all routes for the MX feature.
///
/// Builds the MX client from the config and environment credentials; fails
/// when the mx config section or the API key is missing.
pub fn routes(config: Arc<AppConfig>) -> Result<Router, MxError> {
    let mx_config = config
        .mx
        .as_ref()
        .ok_or_else(|| MxError::ConfigError("mx section missing from configuration".to_string()))?;
    let client = MxClient::new(mx_config)?;
    Ok(routes_with_client(config.clone(), Arc::new(client)))
}

/// Creates the router over an explicit client. Tests use this to point the
/// handlers at a stub server.
pub fn routes_with_client(config: Arc<AppConfig>, client: Arc<MxClient>) -> Router {
    let state = Arc::new(MxState { config, client });

    Router::new()
        .route(
            "/mx/users",
            post(create_user_handler).fallback(method_not_allowed),
        )
        .route(
            "/mx/widget-url",
            get(widget_url_handler).fallback(method_not_allowed),
        )
        .route(
            "/mx/accounts",
            get(verified_accounts_handler).fallback(method_not_allowed),
        )
        .route(
            "/mx/processor_token",
            post(authorization_code_handler).fallback(method_not_allowed),
        )
        .with_state(state)
}
