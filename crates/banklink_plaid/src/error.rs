// --- File: crates/banklink_plaid/src/error.rs ---
use banklink_common::{external_service_error, BanklinkError, HttpStatusCode};
use thiserror::Error;

/// Plaid-specific error types.
#[derive(Error, Debug)]
pub enum PlaidError {
    /// Error occurred during a Plaid API request
    #[error("Plaid API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Plaid API
    #[error("Plaid API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Error parsing a Plaid API response
    #[error("Failed to parse Plaid API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or incomplete Plaid configuration
    #[error("Plaid configuration missing or incomplete: {0}")]
    ConfigError(String),
}

/// Convert PlaidError to BanklinkError
impl From<PlaidError> for BanklinkError {
    fn from(err: PlaidError) -> Self {
        match err {
            PlaidError::RequestError(e) => {
                BanklinkError::HttpError(format!("Plaid request error: {e}"))
            }
            PlaidError::ApiError {
                status_code,
                message,
            } => external_service_error(
                "Plaid API",
                format!("Status: {status_code}, Message: {message}"),
            ),
            PlaidError::ParseError(e) => {
                BanklinkError::ParseError(format!("Plaid response parse error: {e}"))
            }
            PlaidError::ConfigError(msg) => BanklinkError::ConfigError(msg),
        }
    }
}

impl HttpStatusCode for PlaidError {
    fn status_code(&self) -> u16 {
        match self {
            PlaidError::RequestError(_) => 500,
            PlaidError::ApiError { status_code, .. } => *status_code,
            PlaidError::ParseError(_) => 502,
            PlaidError::ConfigError(_) => 500,
        }
    }
}
