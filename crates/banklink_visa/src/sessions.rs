// --- File: crates/banklink_visa/src/sessions.rs ---
//! Exchange-session orchestration over the payments platform.
//!
//! Visa linking is platform-brokered: the platform opens a hosted session
//! with Visa, the user completes it there, and the redirect comes back with
//! an exchange id. This crate only starts sessions and reads back their
//! hosted URLs; funding-source creation from the returned exchange id stays
//! with the platform routes.

use crate::error::VisaError;
use banklink_dwolla::{DwollaClient, PartyRef, ResourceLocation};

/// Name Visa is registered under in the platform's exchange-partner list.
pub const VISA_PARTNER_NAME: &str = "Visa";

/// Starts a hosted exchange session for the party.
pub async fn start_session(
    client: &DwollaClient,
    party: &PartyRef,
) -> Result<ResourceLocation, VisaError> {
    let partner = client.resolve_exchange_partner(VISA_PARTNER_NAME).await?;
    Ok(client.create_exchange_session(party, &partner).await?)
}

/// Fetches the hosted URL the user must be sent to for an open session.
pub async fn session_url(client: &DwollaClient, session_id: &str) -> Result<String, VisaError> {
    Ok(client.get_exchange_session(session_id).await?)
}
