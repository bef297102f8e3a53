// --- File: crates/banklink_flinks/src/error.rs ---

use banklink_common::error::{BanklinkError, HttpStatusCode};
use thiserror::Error;

/// Errors specific to the Flinks integration.
#[derive(Error, Debug)]
pub enum FlinksError {
    #[error("HTTP request to Flinks failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Flinks API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Failed to parse Flinks response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Flinks returned no accounts for the request")]
    NoAccounts,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<FlinksError> for BanklinkError {
    fn from(err: FlinksError) -> Self {
        match err {
            FlinksError::RequestError(e) => BanklinkError::ExternalServiceError {
                service_name: "Flinks API".to_string(),
                message: format!("Flinks request failed: {}", e),
            },
            FlinksError::ApiError {
                status_code,
                message,
            } => BanklinkError::ExternalServiceError {
                service_name: "Flinks API".to_string(),
                message: format!("Flinks API error {}: {}", status_code, message),
            },
            FlinksError::ParseError(e) => BanklinkError::ExternalServiceError {
                service_name: "Flinks API".to_string(),
                message: format!("Flinks response parse error: {}", e),
            },
            FlinksError::NoAccounts => BanklinkError::ExternalServiceError {
                service_name: "Flinks API".to_string(),
                message: "Flinks returned no accounts".to_string(),
            },
            FlinksError::ConfigError(msg) => BanklinkError::ConfigError(msg),
        }
    }
}

impl HttpStatusCode for FlinksError {
    fn status_code(&self) -> u16 {
        match self {
            FlinksError::RequestError(_) => 500,
            FlinksError::ApiError { status_code, .. } => *status_code,
            FlinksError::ParseError(_) => 502,
            FlinksError::NoAccounts => 502,
            FlinksError::ConfigError(_) => 500,
        }
    }
}
