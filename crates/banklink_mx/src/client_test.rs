// --- File: crates/banklink_mx/src/client_test.rs ---

#[cfg(test)]
mod tests {
    use crate::client::{new_user_body, verification_scope};
    use uuid::Uuid;

    #[test]
    fn scope_names_the_guids_in_order() {
        let scope = verification_scope("ACT-1", "MBR-2", "USR-3");
        assert_eq!(
            scope,
            "account-guid:ACT-1 member-guid:MBR-2 user-guid:USR-3 read-protected"
        );
    }

    #[test]
    fn user_body_nests_email_under_user() {
        let body = new_user_body("jane@example.com");
        assert_eq!(body["user"]["email"], "jane@example.com");
    }

    #[test]
    fn user_body_id_is_a_uuid() {
        let body = new_user_body("jane@example.com");
        let id = body["user"]["id"].as_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[test]
    fn each_user_body_gets_a_fresh_id() {
        let first = new_user_body("a@example.com");
        let second = new_user_body("a@example.com");
        assert_ne!(first["user"]["id"], second["user"]["id"]);
    }
}
