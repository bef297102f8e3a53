// --- File: crates/banklink_dwolla/src/flow.rs ---
//! The end-to-end linking flow: vendor artifact in, funding source out.

use crate::client::DwollaClient;
use crate::error::DwollaError;
use crate::models::{BankAccountType, ExchangeReference, LinkArtifact, PartyRef, ResourceLocation};
use tracing::info;

/// Options for [`link_funding_source`].
#[derive(Debug, Clone)]
pub struct LinkFundingSourceOptions {
    pub party: PartyRef,
    pub artifact: LinkArtifact,
    /// Partner already resolved by the caller. When None the partner is
    /// looked up by the artifact's vendor name.
    pub partner: Option<ExchangeReference>,
    /// Display name of the funding source.
    pub name: String,
    pub bank_account_type: BankAccountType,
}

/// Turns a completed vendor link into a funding source.
///
/// Strictly sequential: resolve the exchange partner, create the exchange
/// (or, for a session-produced artifact, synthesize the exchange URL), then
/// create the funding source against it. Every step starts only after the
/// previous one succeeded, and the first failure aborts the whole flow, so a
/// funding source can never exist without its exchange. Nothing is retried
/// and partial progress is left as-is.
pub async fn link_funding_source(
    client: &DwollaClient,
    options: LinkFundingSourceOptions,
) -> Result<ResourceLocation, DwollaError> {
    let LinkFundingSourceOptions {
        party,
        artifact,
        partner,
        name,
        bank_account_type,
    } = options;

    // A session-produced artifact already has its exchange; everything else
    // needs the partner resolved before an exchange can be created.
    let exchange_url = match &artifact {
        LinkArtifact::Visa { exchange_id } => client.exchange_url(exchange_id),
        _ => {
            let partner = match partner {
                Some(partner) => partner,
                None => {
                    client
                        .resolve_exchange_partner(artifact.partner_name())
                        .await?
                }
            };
            client
                .create_exchange(&party, &partner, &artifact)
                .await?
                .into_href()
        }
    };

    let location = client
        .create_funding_source(&party, &exchange_url, &name, bank_account_type)
        .await?;
    info!(
        vendor = artifact.partner_name(),
        funding_source = %location.href(),
        "Link flow completed"
    );
    Ok(location)
}
