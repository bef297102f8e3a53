// --- File: crates/banklink_finicity/src/client_test.rs ---

#[cfg(test)]
mod tests {
    use crate::client::consent_request_body;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn consent_body_windows_one_month_from_now() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let body = consent_request_body("fin-partner", "cus-1", "acct-1", now);

        assert_eq!(
            body,
            json!({
                "customerId": "cus-1",
                "partnerId": "fin-partner",
                "thirdPartyPartnerId": "2445583946651",
                "products": [
                    {
                        "product": "moneyTransferDetails",
                        "payorId": "fin-partner",
                        "accountId": "acct-1",
                        "maxCalls": 10,
                        "accessPeriod": {
                            "type": "timeframe",
                            "startTime": "2024-06-01T12:00:00.000Z",
                            "endTime": "2024-07-01T12:00:00.000Z",
                        }
                    }
                ]
            })
        );
    }

    #[test]
    fn consent_window_clamps_to_month_end() {
        let now = Utc.with_ymd_and_hms(2024, 1, 31, 9, 30, 0).unwrap();
        let body = consent_request_body("fin-partner", "cus-1", "acct-1", now);

        let access_period = &body["products"][0]["accessPeriod"];
        assert_eq!(access_period["startTime"], "2024-01-31T09:30:00.000Z");
        // January 31 plus one month lands on the last day of February.
        assert_eq!(access_period["endTime"], "2024-02-29T09:30:00.000Z");
    }

    #[test]
    fn payor_and_partner_are_the_same_id() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let body = consent_request_body("fin-partner", "cus-1", "acct-1", now);
        assert_eq!(body["partnerId"], body["products"][0]["payorId"]);
    }
}
