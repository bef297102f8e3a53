// --- File: crates/banklink_dwolla/src/lib.rs ---

pub mod client;
pub mod doc;
pub mod error;
pub mod flow;
pub mod handlers;
pub mod models;
#[cfg(test)]
mod models_test;
pub mod routes;

// Re-export for main backend
pub use client::DwollaClient;
pub use error::DwollaError;
pub use flow::{link_funding_source, LinkFundingSourceOptions};
pub use models::{
    BankAccountType, CreatePartyOptions, ExchangePartner, ExchangeReference, LinkArtifact,
    MxArtifact, PartyRef, ResourceLocation,
};
pub use routes::{routes, routes_with_client};
