// --- File: crates/banklink_visa/src/lib.rs ---

pub mod doc;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod sessions;

// Re-export for main backend
pub use error::VisaError;
pub use routes::{routes, routes_with_client};
pub use sessions::{session_url, start_session, VISA_PARTNER_NAME};
