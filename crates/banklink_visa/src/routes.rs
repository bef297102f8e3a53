// --- File: crates/banklink_visa/src/routes.rs ---

use crate::error::VisaError;
use crate::handlers::{create_session_handler, session_url_handler, VisaState};
use axum::{
    routing::{get, post},
    Router,
};
use banklink_common::method_not_allowed;
use banklink_config::AppConfig;
use banklink_dwolla::DwollaClient;
use std::sync::Arc;

/// Creates a router containing all routes for the Visa feature.
///
/// The flow runs against the payments platform, so this builds a platform
/// client from the dwolla config section and its environment credentials.
pub fn routes(config: Arc<AppConfig>) -> Result<Router, VisaError> {
    let dwolla_config = config.dwolla.as_ref().ok_or_else(|| {
        VisaError::ConfigError("dwolla section missing from configuration".to_string())
    })?;
    let client = DwollaClient::new(dwolla_config)?;
    Ok(routes_with_client(config.clone(), Arc::new(client)))
}

/// Creates the router over an explicit platform client. Tests use this to
/// point the handlers at a stub server.
pub fn routes_with_client(config: Arc<AppConfig>, client: Arc<DwollaClient>) -> Router {
    let state = Arc::new(VisaState { config, client });

    Router::new()
        .route(
            "/visa/exchange-sessions",
            post(create_session_handler).fallback(method_not_allowed),
        )
        .route(
            "/visa/exchange-sessions/{session_id}",
            get(session_url_handler).fallback(method_not_allowed),
        )
        .with_state(state)
}
