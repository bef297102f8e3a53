// --- File: crates/banklink_common/src/lib.rs ---

// Declare modules within this crate
pub mod api; //        Shared HTTP response contract (400/405/500 shapes)
pub mod error; //      Error handling
pub mod http; //       HTTP client utilities
pub mod logging; //    Logging utilities
pub mod token; //      Bearer-token caching
pub mod validation; // Request body validation rules

// Re-export error types and utilities for easier access
pub use error::{
    config_error, external_service_error, internal_error, not_found, validation_error,
    BanklinkError, HttpStatusCode,
};

// Re-export HTTP utilities for easier access
pub use http::{create_client, HTTP_CLIENT};

// Re-export the API contract pieces routes use on every handler
pub use api::{method_not_allowed, require_keys, vendor_failure, ApiError};

pub use token::TokenCache;
pub use validation::{eq_ignore_case, missing_keys};
