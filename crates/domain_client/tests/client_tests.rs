//! Tests for the client domain

use core_kernel::{matches_term, ClientId, Searchable};
use domain_client::{BankDetails, Client, ClientError, KycStatus};
use proptest::prelude::*;

fn sample(id: &str, name: &str, kyc_status: KycStatus) -> Client {
    Client {
        id: ClientId::new(id),
        name: name.to_string(),
        pan_card: "PQRSX6789K".to_string(),
        email: format!("{}@mail.test", id.to_lowercase()),
        phone: "9800000000".to_string(),
        kyc_status,
        bank_details: BankDetails {
            account_number: "50100123456789".to_string(),
            bank_name: "ICICI Bank".to_string(),
            ifsc_code: "ICIC0001234".to_string(),
        },
    }
}

// ============================================================================
// KYC gating
// ============================================================================

mod kyc_gate_tests {
    use super::*;

    #[test]
    fn test_verified_can_transact() {
        let client = sample("CL1", "Arjun Rao", KycStatus::Verified);
        assert!(client.can_transact());
        assert!(client.ensure_can_transact().is_ok());
    }

    #[test]
    fn test_rejected_cannot_transact() {
        let client = sample("CL2", "Meera Iyer", KycStatus::Rejected);
        assert_eq!(
            client.ensure_can_transact(),
            Err(ClientError::KycNotVerified("REJECTED".to_string()))
        );
    }

    #[test]
    fn test_warning_names_actual_status() {
        let client = sample("CL3", "Kabir Das", KycStatus::Pending);
        assert!(client.kyc_warning().unwrap().contains("PENDING"));
    }
}

// ============================================================================
// Wire format
// ============================================================================

mod wire_tests {
    use super::*;

    #[test]
    fn test_deserialize_brokerage_payload() {
        let json = r#"{
            "id": "CL9",
            "name": "Farah Khan",
            "panCard": "AAAPK1234C",
            "email": "farah@mail.test",
            "phone": "9811111111",
            "kycStatus": "PENDING",
            "bankDetails": {
                "accountNumber": "12345678",
                "bankName": "Axis Bank",
                "ifscCode": "UTIB0000001"
            }
        }"#;
        let client: Client = serde_json::from_str(json).unwrap();
        assert_eq!(client.id.as_str(), "CL9");
        assert_eq!(client.kyc_status, KycStatus::Pending);
        assert_eq!(client.bank_details.bank_name, "Axis Bank");
    }

    #[test]
    fn test_unknown_kyc_status_rejected() {
        let json = r#"{"id":"CL9","name":"x","panCard":"x","email":"x","phone":"x",
            "kycStatus":"EXPIRED","bankDetails":{"accountNumber":"x","bankName":"x","ifscCode":"x"}}"#;
        assert!(serde_json::from_str::<Client>(json).is_err());
    }
}

// ============================================================================
// Search
// ============================================================================

mod search_tests {
    use super::*;

    #[test]
    fn test_search_key_is_id() {
        let client = sample("CL7", "Zoya Akhtar", KycStatus::Verified);
        assert_eq!(client.search_key(), "CL7");
    }

    #[test]
    fn test_matches_name_pan_and_email() {
        let client = sample("CL7", "Zoya Akhtar", KycStatus::Verified);
        assert!(matches_term(client.search_fields(), "zoya"));
        assert!(matches_term(client.search_fields(), "pqrsx"));
        assert!(matches_term(client.search_fields(), "cl7@mail"));
        assert!(!matches_term(client.search_fields(), "ICICI"));
    }
}

proptest! {
    #[test]
    fn any_substring_of_name_matches(start in 0usize..8, len in 1usize..6) {
        let client = sample("CL1", "Venkatesh Prasad", KycStatus::Verified);
        let name = client.name.clone();
        let end = (start + len).min(name.len());
        let term = &name[start..end];
        prop_assert!(matches_term(client.search_fields(), &term.to_uppercase()));
    }
}
