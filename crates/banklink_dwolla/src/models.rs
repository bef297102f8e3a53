// --- File: crates/banklink_dwolla/src/models.rs ---
//! Domain types for the Dwolla platform integration: party scopes, resource
//! references and the per-vendor link artifacts that exchanges are built from.

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// The party that owns exchanges, exchange sessions and funding sources.
///
/// Classic quickstart flows operate on customers; the open-banking flows can
/// also operate on external parties. Both own the same sub-resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartyRef {
    Customer(String),
    ExternalParty(String),
}

impl PartyRef {
    /// Path prefix of the owning collection.
    pub fn path_prefix(&self) -> &'static str {
        match self {
            PartyRef::Customer(_) => "customers",
            PartyRef::ExternalParty(_) => "external-parties",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            PartyRef::Customer(id) | PartyRef::ExternalParty(id) => id,
        }
    }
}

/// Location of a created resource, as returned in the `Location` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocation(String);

impl ResourceLocation {
    pub fn new(href: impl Into<String>) -> Self {
        ResourceLocation(href.into())
    }

    pub fn href(&self) -> &str {
        &self.0
    }

    /// The resource id, i.e. the trailing path segment of the href.
    pub fn id(&self) -> &str {
        trailing_segment(&self.0)
    }

    pub fn into_href(self) -> String {
        self.0
    }
}

/// A reference to an exchange partner carrying both the resource href and the
/// partner id, so callers needing either form resolve the partner once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeReference {
    pub href: String,
    pub id: String,
}

impl ExchangeReference {
    /// Builds a reference from a bare href; the id is the trailing path
    /// segment.
    pub fn from_href(href: impl Into<String>) -> Self {
        let href = href.into();
        let id = trailing_segment(&href).to_string();
        ExchangeReference { href, id }
    }
}

fn trailing_segment(url: &str) -> &str {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(url)
}

/// An exchange partner as embedded in the platform's partner list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangePartner {
    pub name: String,
    /// Partner id, present on newer API responses.
    #[serde(default)]
    pub exchange_partner_id: Option<String>,
    #[serde(default, rename = "_links")]
    pub links: ResourceLinks,
}

impl ExchangePartner {
    /// Unified reference for this partner: the self-link href plus the id,
    /// taken from the explicit partner id when the API provides one and
    /// derived from the href otherwise. None when the self link is absent.
    pub fn reference(&self) -> Option<ExchangeReference> {
        let href = self.links.self_link.as_ref()?.href.clone();
        let id = self
            .exchange_partner_id
            .clone()
            .unwrap_or_else(|| trailing_segment(&href).to_string());
        Some(ExchangeReference { href, id })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceLinks {
    #[serde(rename = "self")]
    pub self_link: Option<Link>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub href: String,
}

/// Options for creating an unverified customer or an external party.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartyOptions {
    #[cfg_attr(feature = "openapi", schema(example = "Jane"))]
    pub first_name: String,
    #[cfg_attr(feature = "openapi", schema(example = "Merchant"))]
    pub last_name: String,
    #[cfg_attr(feature = "openapi", schema(example = "jane.merchant@nomail.net"))]
    pub email: String,
}

/// Bank account type accepted for funding sources.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankAccountType {
    Checking,
    Savings,
}

/// The vendor-issued credential material a completed link flow produces,
/// one variant per aggregator with exactly one serialized form each.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "vendor", rename_all = "lowercase")]
pub enum LinkArtifact {
    /// Plaid processor token.
    Plaid { token: String },
    /// Finicity money-transfer-details consent receipt.
    Finicity { receipt: Value },
    /// MX authorization code or verified account pair, depending on the flow.
    Mx(MxArtifact),
    /// Flinks auth secret and per-account access token.
    #[serde(rename_all = "camelCase")]
    Flinks {
        auth_secret: String,
        access_token: String,
    },
    /// Exchange already created by a Visa hosted session.
    #[serde(rename_all = "camelCase")]
    Visa { exchange_id: String },
}

/// The two shapes MX link flows produce.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MxArtifact {
    /// Processor authorization code from the token-exchange flow.
    #[serde(rename_all = "camelCase")]
    AuthorizationCode { authorization_code: String },
    /// Member/account pair from the open-banking verification flow.
    #[serde(rename_all = "camelCase")]
    VerifiedAccount {
        member_id: String,
        account_id: String,
    },
}

impl LinkArtifact {
    /// The vendor's name as registered in the platform's exchange-partner
    /// list. Matching is case-insensitive downstream.
    pub fn partner_name(&self) -> &'static str {
        match self {
            LinkArtifact::Plaid { .. } => "PLAID",
            LinkArtifact::Finicity { .. } => "Finicity",
            LinkArtifact::Mx(_) => "MX",
            LinkArtifact::Flinks { .. } => "Flinks",
            LinkArtifact::Visa { .. } => "Visa",
        }
    }

    /// The exchange request body for this artifact, or None for the Visa
    /// variant where the hosted session already created the exchange.
    ///
    /// Every variant except the legacy MX authorization code links the
    /// partner by href; the legacy MX body is flat and uses the bare id.
    pub fn exchange_body(&self, partner: &ExchangeReference) -> Option<Value> {
        match self {
            LinkArtifact::Plaid { token } => Some(json!({
                "_links": partner_links(partner),
                "token": token,
            })),
            LinkArtifact::Finicity { receipt } => Some(json!({
                "_links": partner_links(partner),
                "finicity": receipt,
            })),
            LinkArtifact::Mx(MxArtifact::AuthorizationCode { authorization_code }) => {
                Some(json!({
                    "exchangePartnerId": partner.id,
                    "token": authorization_code,
                }))
            }
            LinkArtifact::Mx(MxArtifact::VerifiedAccount {
                member_id,
                account_id,
            }) => Some(json!({
                "_links": partner_links(partner),
                "mx": {
                    "memberId": member_id,
                    "accountId": account_id,
                },
            })),
            LinkArtifact::Flinks {
                auth_secret,
                access_token,
            } => Some(json!({
                "_links": partner_links(partner),
                "token": tokenify_flinks_auth(auth_secret, access_token),
            })),
            LinkArtifact::Visa { .. } => None,
        }
    }
}

fn partner_links(partner: &ExchangeReference) -> Value {
    json!({
        "exchange-partner": {
            "href": partner.href,
        }
    })
}

/// Combines the Flinks auth secret and access token in basic-auth format and
/// base64 encodes the pair. This token is what the exchange is created with.
fn tokenify_flinks_auth(auth_secret: &str, access_token: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(format!("{auth_secret}:{access_token}"))
}
