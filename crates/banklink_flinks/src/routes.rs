// --- File: crates/banklink_flinks/src/routes.rs ---

use crate::client::FlinksClient;
use crate::error::FlinksError;
use crate::handlers::{
    access_token_handler, accounts_summary_handler, auth_secret_handler, connect_handler,
    connect_widget_handler, request_id_handler, FlinksState,
};
use axum::{
    routing::{get, post},
    Router,
};
use banklink_common::method_not_allowed;
use banklink_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing all routes for the Flinks feature.
///
/// Builds the Flinks client from the config and environment credentials;
/// fails when the flinks config section or the API secret is missing. The
/// widget runs in demo mode whenever the platform environment is sandbox.
pub fn routes(config: Arc<AppConfig>) -> Result<Router, FlinksError> {
    let flinks_config = config.flinks.as_ref().ok_or_else(|| {
        FlinksError::ConfigError("flinks section missing from configuration".to_string())
    })?;
    // Without a dwolla section there is no production platform to point at,
    // so the widget stays in demo mode.
    let demo = config
        .dwolla
        .as_ref()
        .map(|dwolla| dwolla.environment.is_sandbox())
        .unwrap_or(true);
    let client = FlinksClient::new(flinks_config, demo)?;
    Ok(routes_with_client(config.clone(), Arc::new(client)))
}

/// Creates the router over an explicit client. Tests use this to point the
/// handlers at a stub server.
pub fn routes_with_client(config: Arc<AppConfig>, client: Arc<FlinksClient>) -> Router {
    let state = Arc::new(FlinksState { config, client });

    Router::new()
        .route(
            "/flinks/connect-widget",
            get(connect_widget_handler).fallback(method_not_allowed),
        )
        .route(
            "/flinks/auth-secret",
            post(auth_secret_handler).fallback(method_not_allowed),
        )
        .route(
            "/flinks/request-id",
            post(request_id_handler).fallback(method_not_allowed),
        )
        .route(
            "/flinks/accounts-summary",
            post(accounts_summary_handler).fallback(method_not_allowed),
        )
        .route(
            "/flinks/access-token",
            post(access_token_handler).fallback(method_not_allowed),
        )
        .route(
            "/flinks/connect",
            post(connect_handler).fallback(method_not_allowed),
        )
        .with_state(state)
}
