// --- File: crates/banklink_dwolla/src/models_test.rs ---

#[cfg(test)]
mod tests {
    use crate::models::{
        BankAccountType, ExchangePartner, ExchangeReference, LinkArtifact, MxArtifact, PartyRef,
        ResourceLocation,
    };
    use serde_json::{json, Value};

    const PARTNER_HREF: &str = "https://api-sandbox.dwolla.com/exchange-partners/9b5b4ddc";

    fn partner_ref() -> ExchangeReference {
        ExchangeReference::from_href(PARTNER_HREF)
    }

    #[test]
    fn party_ref_paths() {
        let customer = PartyRef::Customer("c-1".to_string());
        assert_eq!(customer.path_prefix(), "customers");
        assert_eq!(customer.id(), "c-1");

        let party = PartyRef::ExternalParty("ep-1".to_string());
        assert_eq!(party.path_prefix(), "external-parties");
        assert_eq!(party.id(), "ep-1");
    }

    #[test]
    fn resource_location_extracts_trailing_id() {
        let location = ResourceLocation::new("https://api.dwolla.com/funding-sources/fs-42");
        assert_eq!(location.id(), "fs-42");
        assert_eq!(location.href(), "https://api.dwolla.com/funding-sources/fs-42");
    }

    #[test]
    fn exchange_reference_id_ignores_trailing_slash() {
        let reference = ExchangeReference::from_href("https://api.dwolla.com/exchange-partners/abc/");
        assert_eq!(reference.id, "abc");
        assert_eq!(reference.href, "https://api.dwolla.com/exchange-partners/abc/");
    }

    #[test]
    fn partner_reference_prefers_explicit_id() {
        let partner: ExchangePartner = serde_json::from_value(json!({
            "name": "MX",
            "exchangePartnerId": "mx-explicit",
            "_links": { "self": { "href": PARTNER_HREF } }
        }))
        .unwrap();

        let reference = partner.reference().unwrap();
        assert_eq!(reference.id, "mx-explicit");
        assert_eq!(reference.href, PARTNER_HREF);
    }

    #[test]
    fn partner_reference_falls_back_to_href_segment() {
        let partner: ExchangePartner = serde_json::from_value(json!({
            "name": "PLAID",
            "_links": { "self": { "href": PARTNER_HREF } }
        }))
        .unwrap();

        let reference = partner.reference().unwrap();
        assert_eq!(reference.id, "9b5b4ddc");
    }

    #[test]
    fn partner_without_links_has_no_reference() {
        let partner: ExchangePartner = serde_json::from_value(json!({ "name": "Orphan" })).unwrap();
        assert!(partner.reference().is_none());
    }

    #[test]
    fn artifact_partner_names() {
        let plaid = LinkArtifact::Plaid { token: "processor-token".to_string() };
        assert_eq!(plaid.partner_name(), "PLAID");

        let finicity = LinkArtifact::Finicity { receipt: json!({}) };
        assert_eq!(finicity.partner_name(), "Finicity");

        let mx = LinkArtifact::Mx(MxArtifact::AuthorizationCode {
            authorization_code: "code".to_string(),
        });
        assert_eq!(mx.partner_name(), "MX");

        let flinks = LinkArtifact::Flinks {
            auth_secret: "s".to_string(),
            access_token: "t".to_string(),
        };
        assert_eq!(flinks.partner_name(), "Flinks");

        let visa = LinkArtifact::Visa { exchange_id: "ex-1".to_string() };
        assert_eq!(visa.partner_name(), "Visa");
    }

    #[test]
    fn artifact_deserializes_from_tagged_json() {
        let plaid: LinkArtifact = serde_json::from_value(json!({
            "vendor": "plaid",
            "token": "processor-token"
        }))
        .unwrap();
        assert!(matches!(plaid, LinkArtifact::Plaid { token } if token == "processor-token"));

        let flinks: LinkArtifact = serde_json::from_value(json!({
            "vendor": "flinks",
            "authSecret": "s",
            "accessToken": "t"
        }))
        .unwrap();
        assert!(matches!(flinks, LinkArtifact::Flinks { .. }));

        let mx_code: LinkArtifact = serde_json::from_value(json!({
            "vendor": "mx",
            "authorizationCode": "auth-code"
        }))
        .unwrap();
        assert!(matches!(
            mx_code,
            LinkArtifact::Mx(MxArtifact::AuthorizationCode { .. })
        ));

        let mx_account: LinkArtifact = serde_json::from_value(json!({
            "vendor": "mx",
            "memberId": "MBR-1",
            "accountId": "ACT-1"
        }))
        .unwrap();
        assert!(matches!(
            mx_account,
            LinkArtifact::Mx(MxArtifact::VerifiedAccount { .. })
        ));
    }

    #[test]
    fn plaid_exchange_body_links_partner_and_token() {
        let artifact = LinkArtifact::Plaid { token: "processor-token".to_string() };
        let body = artifact.exchange_body(&partner_ref()).unwrap();
        assert_eq!(
            body,
            json!({
                "_links": { "exchange-partner": { "href": PARTNER_HREF } },
                "token": "processor-token"
            })
        );
    }

    #[test]
    fn finicity_exchange_body_embeds_receipt() {
        let receipt = json!({ "receiptId": "r-1", "customerId": "c-1" });
        let artifact = LinkArtifact::Finicity { receipt: receipt.clone() };
        let body = artifact.exchange_body(&partner_ref()).unwrap();
        assert_eq!(
            body,
            json!({
                "_links": { "exchange-partner": { "href": PARTNER_HREF } },
                "finicity": receipt
            })
        );
    }

    #[test]
    fn mx_authorization_code_body_is_flat() {
        let artifact = LinkArtifact::Mx(MxArtifact::AuthorizationCode {
            authorization_code: "auth-code".to_string(),
        });
        let body = artifact.exchange_body(&partner_ref()).unwrap();
        assert_eq!(
            body,
            json!({
                "exchangePartnerId": "9b5b4ddc",
                "token": "auth-code"
            })
        );
        assert!(body.get("_links").is_none());
    }

    #[test]
    fn mx_verified_account_body_nests_guids() {
        let artifact = LinkArtifact::Mx(MxArtifact::VerifiedAccount {
            member_id: "MBR-1".to_string(),
            account_id: "ACT-1".to_string(),
        });
        let body = artifact.exchange_body(&partner_ref()).unwrap();
        assert_eq!(
            body,
            json!({
                "_links": { "exchange-partner": { "href": PARTNER_HREF } },
                "mx": { "memberId": "MBR-1", "accountId": "ACT-1" }
            })
        );
    }

    #[test]
    fn flinks_exchange_body_encodes_credentials() {
        let artifact = LinkArtifact::Flinks {
            auth_secret: "fl-secret".to_string(),
            access_token: "fl-access".to_string(),
        };
        let body = artifact.exchange_body(&partner_ref()).unwrap();
        assert_eq!(
            body,
            json!({
                "_links": { "exchange-partner": { "href": PARTNER_HREF } },
                "token": "Zmwtc2VjcmV0OmZsLWFjY2Vzcw=="
            })
        );
    }

    #[test]
    fn visa_artifact_has_no_exchange_body() {
        let artifact = LinkArtifact::Visa { exchange_id: "ex-1".to_string() };
        assert!(artifact.exchange_body(&partner_ref()).is_none());
    }

    #[test]
    fn bank_account_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(BankAccountType::Checking).unwrap(),
            Value::String("checking".to_string())
        );
        assert_eq!(
            serde_json::to_value(BankAccountType::Savings).unwrap(),
            Value::String("savings".to_string())
        );
    }
}
