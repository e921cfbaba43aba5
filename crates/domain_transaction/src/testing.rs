//! Records shared by the in-crate tests

use core_kernel::{ClientId, SchemeCode};
use domain_client::{BankDetails, Client, KycStatus};
use domain_fund::{Holding, RiskLevel, Scheme};
use rust_decimal_macros::dec;

use crate::ports::mock::MockBrokeragePort;

pub fn client(kyc_status: KycStatus) -> Client {
    Client {
        id: ClientId::new("CL001"),
        name: "Priya Sharma".to_string(),
        pan_card: "ABCDE1234F".to_string(),
        email: "priya@example.com".to_string(),
        phone: "9876543210".to_string(),
        kyc_status,
        bank_details: BankDetails {
            account_number: "1234567890".to_string(),
            bank_name: "HDFC Bank".to_string(),
            ifsc_code: "HDFC0001234".to_string(),
        },
    }
}

/// min 500, max 100000, NAV 25
pub fn scheme(code: &str) -> Scheme {
    Scheme {
        scheme_code: SchemeCode::new(code),
        scheme_name: format!("{} Growth Fund", code),
        amc_code: "AXIS".to_string(),
        amc_name: "Axis Mutual Fund".to_string(),
        nav: dec!(25),
        min_amount: dec!(500),
        max_amount: dec!(100000),
        category: "Large Cap".to_string(),
        risk_level: RiskLevel::Moderate,
    }
}

/// 120 units worth 3000 at NAV 25
pub fn holding(code: &str) -> Holding {
    Holding::new(SchemeCode::new(code), format!("{} Growth Fund", code), dec!(120), dec!(2400), dec!(25))
}

/// A mock holding 120 units of `S1` for `CL001`
pub async fn port_with_holding() -> MockBrokeragePort {
    MockBrokeragePort::new()
        .with_holding(ClientId::new("CL001"), holding("S1"))
        .await
}
