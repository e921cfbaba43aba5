//! Transaction records
//!
//! Transactions are created by a submission to the brokerage and their
//! status moves only on the remote side. The desk displays whatever status
//! it fetched last.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClientId, OrderNumber, SchemeCode, TransactionId};
use crate::error::FundError;

/// Kind of order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Purchase,
    Redeem,
    Switch,
}

impl TransactionType {
    pub const ALL: [TransactionType; 3] = [
        TransactionType::Purchase,
        TransactionType::Redeem,
        TransactionType::Switch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Purchase => "PURCHASE",
            TransactionType::Redeem => "REDEEM",
            TransactionType::Switch => "SWITCH",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = FundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        TransactionType::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| FundError::unknown("transaction type", s))
    }
}

/// Order status as last reported by the brokerage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
    Cancelled,
}

impl TransactionStatus {
    pub const ALL: [TransactionStatus; 4] = [
        TransactionStatus::Pending,
        TransactionStatus::Success,
        TransactionStatus::Failed,
        TransactionStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Success => "SUCCESS",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Cancelled => "CANCELLED",
        }
    }

    /// Whether the brokerage will not move this order any further
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = FundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        TransactionStatus::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| FundError::unknown("transaction status", s))
    }
}

/// An order as recorded by the brokerage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub client_id: ClientId,
    pub transaction_type: TransactionType,
    pub scheme_code: SchemeCode,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub amount: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub units: Option<Decimal>,
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<OrderNumber>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl Transaction {
    /// Whole days elapsed between the transaction and `now`, floored
    ///
    /// Negative for timestamps in the future.
    pub fn days_since(&self, now: DateTime<Utc>) -> i64 {
        let elapsed = now.signed_duration_since(self.timestamp);
        elapsed.num_seconds().div_euclid(86_400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn tx(timestamp: DateTime<Utc>) -> Transaction {
        Transaction {
            id: TransactionId::new("T1"),
            client_id: ClientId::new("CL1"),
            transaction_type: TransactionType::Purchase,
            scheme_code: SchemeCode::new("S1"),
            amount: None,
            units: None,
            status: TransactionStatus::Pending,
            order_number: None,
            timestamp,
            remarks: None,
        }
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("redeem".parse::<TransactionType>().unwrap(), TransactionType::Redeem);
        assert_eq!("CANCELLED".parse::<TransactionStatus>().unwrap(), TransactionStatus::Cancelled);
        assert!("REFUND".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_terminal_status() {
        assert!(!TransactionStatus::Pending.is_terminal());
        assert!(TransactionStatus::Success.is_terminal());
        assert!(TransactionStatus::Failed.is_terminal());
    }

    #[test]
    fn test_days_since_floors() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        assert_eq!(tx(now - Duration::hours(23)).days_since(now), 0);
        assert_eq!(tx(now - Duration::hours(49)).days_since(now), 2);
        assert_eq!(tx(now + Duration::hours(1)).days_since(now), -1);
    }

    #[test]
    fn test_wire_format_omits_absent_fields() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        let json = serde_json::to_value(tx(now)).unwrap();
        assert_eq!(json["transactionType"], "PURCHASE");
        assert!(json.get("amount").is_none());
        assert!(json.get("orderNumber").is_none());
    }
}
