// --- File: crates/banklink_plaid/src/lib.rs ---

pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod routes;

// Re-export for main backend
pub use error::PlaidError;
pub use logic::PlaidClient;
pub use routes::{routes, routes_with_client};
