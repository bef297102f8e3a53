// --- File: crates/banklink_flinks/src/lib.rs ---

pub mod client;
pub mod connect;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod routes;

// Re-export for main backend
pub use client::{ConnectWidget, FlinksAccount, FlinksClient};
pub use connect::{ConnectAction, ConnectEvent, ConnectState};
pub use error::FlinksError;
pub use logic::{drive, run_token_exchange, DWOLLA_PARTNER_NAME};
pub use routes::{routes, routes_with_client};
