// --- File: crates/banklink_mx/src/error.rs ---

use banklink_common::error::{BanklinkError, HttpStatusCode};
use thiserror::Error;

/// Errors specific to the MX Platform integration.
#[derive(Error, Debug)]
pub enum MxError {
    #[error("HTTP request to MX failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("MX API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Failed to parse MX response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<MxError> for BanklinkError {
    fn from(err: MxError) -> Self {
        match err {
            MxError::RequestError(e) => BanklinkError::ExternalServiceError {
                service_name: "MX API".to_string(),
                message: format!("MX request failed: {}", e),
            },
            MxError::ApiError {
                status_code,
                message,
            } => BanklinkError::ExternalServiceError {
                service_name: "MX API".to_string(),
                message: format!("MX API error {}: {}", status_code, message),
            },
            MxError::ParseError(e) => BanklinkError::ExternalServiceError {
                service_name: "MX API".to_string(),
                message: format!("MX response parse error: {}", e),
            },
            MxError::ConfigError(msg) => BanklinkError::ConfigError(msg),
        }
    }
}

impl HttpStatusCode for MxError {
    fn status_code(&self) -> u16 {
        match self {
            MxError::RequestError(_) => 500,
            MxError::ApiError { status_code, .. } => *status_code,
            MxError::ParseError(_) => 502,
            MxError::ConfigError(_) => 500,
        }
    }
}
