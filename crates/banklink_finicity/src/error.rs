// --- File: crates/banklink_finicity/src/error.rs ---
use banklink_common::{external_service_error, BanklinkError, HttpStatusCode};
use thiserror::Error;

/// Finicity-specific error types.
#[derive(Error, Debug)]
pub enum FinicityError {
    /// Error occurred during a Finicity API request
    #[error("Finicity API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Finicity API
    #[error("Finicity API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Error parsing a Finicity API response
    #[error("Failed to parse Finicity API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Partner credentials were rejected or the authentication endpoint failed
    #[error("Finicity authentication failed: {0}")]
    AuthError(String),

    /// Missing or incomplete Finicity configuration
    #[error("Finicity configuration missing or incomplete: {0}")]
    ConfigError(String),

    /// The consent response carried no receipt
    #[error("Finicity consent response carried no receipt")]
    MissingReceipt,
}

/// Convert FinicityError to BanklinkError
impl From<FinicityError> for BanklinkError {
    fn from(err: FinicityError) -> Self {
        match err {
            FinicityError::RequestError(e) => {
                BanklinkError::HttpError(format!("Finicity request error: {e}"))
            }
            FinicityError::ApiError {
                status_code,
                message,
            } => external_service_error(
                "Finicity API",
                format!("Status: {status_code}, Message: {message}"),
            ),
            FinicityError::ParseError(e) => {
                BanklinkError::ParseError(format!("Finicity response parse error: {e}"))
            }
            FinicityError::AuthError(msg) => BanklinkError::AuthError(msg),
            FinicityError::ConfigError(msg) => BanklinkError::ConfigError(msg),
            FinicityError::MissingReceipt => {
                external_service_error("Finicity API", "consent response carried no receipt")
            }
        }
    }
}

impl HttpStatusCode for FinicityError {
    fn status_code(&self) -> u16 {
        match self {
            FinicityError::RequestError(_) => 500,
            FinicityError::ApiError { status_code, .. } => *status_code,
            FinicityError::ParseError(_) => 502,
            FinicityError::AuthError(_) => 500,
            FinicityError::ConfigError(_) => 500,
            FinicityError::MissingReceipt => 502,
        }
    }
}
