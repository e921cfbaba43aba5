//! KYC (Know Your Customer) status

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ClientError;

/// KYC status as reported by the brokerage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KycStatus {
    Verified,
    Pending,
    Rejected,
}

impl KycStatus {
    /// Only verified investors may place orders
    pub fn allows_transactions(&self) -> bool {
        matches!(self, KycStatus::Verified)
    }

    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            KycStatus::Verified => "VERIFIED",
            KycStatus::Pending => "PENDING",
            KycStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for KycStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KycStatus {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "VERIFIED" => Ok(KycStatus::Verified),
            "PENDING" => Ok(KycStatus::Pending),
            "REJECTED" => Ok(KycStatus::Rejected),
            other => Err(ClientError::UnknownKycStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_verified_allows_transactions() {
        assert!(KycStatus::Verified.allows_transactions());
        assert!(!KycStatus::Pending.allows_transactions());
        assert!(!KycStatus::Rejected.allows_transactions());
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&KycStatus::Pending).unwrap(), "\"PENDING\"");
        let status: KycStatus = serde_json::from_str("\"REJECTED\"").unwrap();
        assert_eq!(status, KycStatus::Rejected);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("verified".parse::<KycStatus>().unwrap(), KycStatus::Verified);
        assert!("UNKNOWN".parse::<KycStatus>().is_err());
    }
}
