// --- File: crates/banklink_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared across all Banklink crates.
///
/// Each integration crate defines its own error enum and implements
/// `From<SpecificError> for BanklinkError` so callers composing several
/// integrations can handle failures uniformly.
#[derive(Error, Debug)]
pub enum BanklinkError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error returned by an upstream vendor API
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// Implemented by every integration crate's error type so the API layer can
/// map failures onto responses without knowing the concrete error.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for BanklinkError {
    fn status_code(&self) -> u16 {
        match self {
            BanklinkError::HttpError(_) => 500,
            BanklinkError::ParseError(_) => 400,
            BanklinkError::ConfigError(_) => 500,
            BanklinkError::AuthError(_) => 401,
            BanklinkError::ValidationError(_) => 400,
            BanklinkError::ExternalServiceError { .. } => 502,
            BanklinkError::NotFoundError(_) => 404,
            BanklinkError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for BanklinkError {
    fn from(err: reqwest::Error) -> Self {
        BanklinkError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for BanklinkError {
    fn from(err: serde_json::Error) -> Self {
        BanklinkError::ParseError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> BanklinkError {
    BanklinkError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> BanklinkError {
    BanklinkError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> BanklinkError {
    BanklinkError::NotFoundError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> BanklinkError {
    BanklinkError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> BanklinkError {
    BanklinkError::InternalError(message.to_string())
}
