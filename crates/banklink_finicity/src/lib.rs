// --- File: crates/banklink_finicity/src/lib.rs ---

pub mod client;
#[cfg(test)]
mod client_test;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod routes;

// Re-export for main backend
pub use client::FinicityClient;
pub use error::FinicityError;
pub use routes::{routes, routes_with_client};
