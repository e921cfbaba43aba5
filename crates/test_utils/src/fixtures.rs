//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the desk. Values are fixed so that
//! they survive a JSON round trip unchanged.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal_macros::dec;

use core_kernel::{ClientId, OrderNumber, SchemeCode, TransactionId};
use domain_client::{BankDetails, Client, KycStatus};
use domain_fund::{Holding, RiskLevel, Scheme, Transaction, TransactionStatus, TransactionType};

use crate::builders::MockPortBuilder;
use domain_transaction::MockBrokeragePort;

/// Fixture for client records
pub struct ClientFixtures;

impl ClientFixtures {
    /// KYC-verified client CL001
    pub fn verified() -> Client {
        Client {
            id: ClientId::new("CL001"),
            name: "Priya Sharma".to_string(),
            pan_card: "ABCDE1234F".to_string(),
            email: "priya.sharma@example.com".to_string(),
            phone: "9876543210".to_string(),
            kyc_status: KycStatus::Verified,
            bank_details: BankDetails {
                account_number: "50100123456789".to_string(),
                bank_name: "HDFC Bank".to_string(),
                ifsc_code: "HDFC0001234".to_string(),
            },
        }
    }

    /// Client CL002 whose KYC is still pending
    pub fn pending() -> Client {
        Client {
            id: ClientId::new("CL002"),
            name: "Rahul Verma".to_string(),
            pan_card: "FGHIJ5678K".to_string(),
            email: "rahul.verma@example.com".to_string(),
            phone: "9123456780".to_string(),
            kyc_status: KycStatus::Pending,
            bank_details: BankDetails {
                account_number: "123456789012".to_string(),
                bank_name: "ICICI Bank".to_string(),
                ifsc_code: "ICIC0000456".to_string(),
            },
        }
    }

    /// Client CL003 whose KYC was rejected
    pub fn rejected() -> Client {
        Client {
            id: ClientId::new("CL003"),
            name: "Anita Desai".to_string(),
            pan_card: "KLMNO9012P".to_string(),
            email: "anita.desai@example.com".to_string(),
            phone: "9988776655".to_string(),
            kyc_status: KycStatus::Rejected,
            bank_details: BankDetails {
                account_number: "987654321098".to_string(),
                bank_name: "State Bank of India".to_string(),
                ifsc_code: "SBIN0007890".to_string(),
            },
        }
    }

    pub fn all() -> Vec<Client> {
        vec![Self::verified(), Self::pending(), Self::rejected()]
    }
}

/// Fixture for schemes
pub struct SchemeFixtures;

impl SchemeFixtures {
    /// AXIS001: min 500, max 100000, NAV 25
    pub fn axis_bluechip() -> Scheme {
        Scheme {
            scheme_code: SchemeCode::new("AXIS001"),
            scheme_name: "Axis Bluechip Fund - Growth".to_string(),
            amc_code: "AXIS".to_string(),
            amc_name: "Axis Mutual Fund".to_string(),
            nav: dec!(25),
            min_amount: dec!(500),
            max_amount: dec!(100000),
            category: "Large Cap".to_string(),
            risk_level: RiskLevel::Moderate,
        }
    }

    /// HDFC002: min 1000, max 500000, NAV 112.5
    pub fn hdfc_midcap() -> Scheme {
        Scheme {
            scheme_code: SchemeCode::new("HDFC002"),
            scheme_name: "HDFC Mid-Cap Opportunities Fund".to_string(),
            amc_code: "HDFC".to_string(),
            amc_name: "HDFC Mutual Fund".to_string(),
            nav: dec!(112.5),
            min_amount: dec!(1000),
            max_amount: dec!(500000),
            category: "Mid Cap".to_string(),
            risk_level: RiskLevel::High,
        }
    }

    /// ICICI003: min 100, max 200000, NAV 10.25
    pub fn icici_liquid() -> Scheme {
        Scheme {
            scheme_code: SchemeCode::new("ICICI003"),
            scheme_name: "ICICI Prudential Liquid Fund".to_string(),
            amc_code: "ICICI".to_string(),
            amc_name: "ICICI Prudential Mutual Fund".to_string(),
            nav: dec!(10.25),
            min_amount: dec!(100),
            max_amount: dec!(200000),
            category: "Liquid".to_string(),
            risk_level: RiskLevel::Low,
        }
    }

    pub fn all() -> Vec<Scheme> {
        vec![Self::axis_bluechip(), Self::hdfc_midcap(), Self::icici_liquid()]
    }
}

/// Fixture for holdings
pub struct HoldingFixtures;

impl HoldingFixtures {
    /// 120 units of AXIS001 worth 3000 at NAV 25, bought for 2400
    pub fn axis_bluechip() -> Holding {
        Holding::new(
            SchemeCode::new("AXIS001"),
            "Axis Bluechip Fund - Growth",
            dec!(120),
            dec!(2400),
            dec!(25),
        )
    }

    /// 40 units of HDFC002 worth 4500 at NAV 112.5, bought for 5000
    pub fn hdfc_midcap_at_loss() -> Holding {
        Holding::new(
            SchemeCode::new("HDFC002"),
            "HDFC Mid-Cap Opportunities Fund",
            dec!(40),
            dec!(5000),
            dec!(112.5),
        )
    }
}

/// Fixture for transaction records
pub struct TransactionFixtures;

impl TransactionFixtures {
    /// Reference instant all fixture timestamps count back from
    pub fn reference_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
    }

    pub fn record(
        id: &str,
        transaction_type: TransactionType,
        status: TransactionStatus,
        scheme_code: &str,
        age_days: i64,
    ) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            client_id: ClientId::new("CL001"),
            transaction_type,
            scheme_code: SchemeCode::new(scheme_code),
            amount: Some(dec!(1000)),
            units: None,
            status,
            order_number: Some(OrderNumber::new(format!("ORD-{}", id))),
            timestamp: Self::reference_now() - Duration::days(age_days),
            remarks: None,
        }
    }

    pub fn pending_purchase() -> Transaction {
        Self::record("TXN1001", TransactionType::Purchase, TransactionStatus::Pending, "AXIS001", 0)
    }

    /// Five records spread over four months
    pub fn history() -> Vec<Transaction> {
        vec![
            Self::record("TXN1001", TransactionType::Purchase, TransactionStatus::Success, "AXIS001", 2),
            Self::record("TXN1002", TransactionType::Redeem, TransactionStatus::Pending, "HDFC002", 6),
            Self::record("TXN1003", TransactionType::Switch, TransactionStatus::Failed, "AXIS001", 25),
            Self::record("TXN1004", TransactionType::Purchase, TransactionStatus::Cancelled, "ICICI003", 60),
            Self::record("TXN1005", TransactionType::Redeem, TransactionStatus::Success, "HDFC002", 120),
        ]
    }
}

/// Fixture for mock brokerage ports
pub struct PortFixtures;

impl PortFixtures {
    /// All fixture clients and schemes, CL001 holding AXIS001 and HDFC002
    pub async fn desk() -> MockBrokeragePort {
        MockPortBuilder::new()
            .with_clients(ClientFixtures::all())
            .with_schemes(SchemeFixtures::all())
            .with_holding(ClientId::new("CL001"), HoldingFixtures::axis_bluechip())
            .with_holding(ClientId::new("CL001"), HoldingFixtures::hdfc_midcap_at_loss())
            .with_history(ClientId::new("CL001"), TransactionFixtures::history())
            .build()
            .await
    }
}
