//! Tests for the brokerage-issued identifier types
//!
//! Covers construction, parsing, display and serde behaviour shared by all
//! identifiers generated from the same macro.

use core_kernel::{ClientId, CoreError, OrderNumber, SchemeCode, TransactionId};
use proptest::prelude::*;

mod client_id_tests {
    use super::*;

    #[test]
    fn test_new_keeps_value() {
        let id = ClientId::new("CL-0042");
        assert_eq!(id.as_str(), "CL-0042");
    }

    #[test]
    fn test_label() {
        assert_eq!(ClientId::label(), "client id");
    }

    #[test]
    fn test_from_str_rejects_blank() {
        let result: Result<ClientId, CoreError> = "".parse();
        assert_eq!(
            result.unwrap_err(),
            CoreError::Validation("client id must not be empty".to_string())
        );
    }

    #[test]
    fn test_ordering_is_lexical() {
        let mut ids = vec![ClientId::new("CL3"), ClientId::new("CL1"), ClientId::new("CL2")];
        ids.sort();
        assert_eq!(ids[0].as_str(), "CL1");
        assert_eq!(ids[2].as_str(), "CL3");
    }
}

mod scheme_code_tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        let a = SchemeCode::from("AXIS-BLUE-G");
        let b = SchemeCode::from("AXIS-BLUE-G".to_string());
        assert_eq!(a, b);
    }

    #[test]
    fn test_as_ref() {
        let code = SchemeCode::new("SBI-SMALL");
        let s: &str = code.as_ref();
        assert_eq!(s, "SBI-SMALL");
    }
}

mod distinct_types_tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_hash_set_dedup() {
        let mut set = HashSet::new();
        set.insert(TransactionId::new("T1"));
        set.insert(TransactionId::new("T1"));
        set.insert(TransactionId::new("T2"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_order_number_serde() {
        let order: OrderNumber = serde_json::from_str("\"ORD123456\"").unwrap();
        assert_eq!(order.to_string(), "ORD123456");
    }
}

proptest! {
    #[test]
    fn parsed_identifier_displays_trimmed_input(raw in "[A-Za-z0-9-]{1,24}") {
        let padded = format!("  {}\t", raw);
        let id: TransactionId = padded.parse().unwrap();
        prop_assert_eq!(id.to_string(), raw);
    }
}
