//! Client (investor) records as served by the brokerage

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ClientId, Searchable};
use crate::error::ClientError;
use crate::kyc::KycStatus;

/// Bank account registered against a client for pay-ins and payouts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    #[validate(length(min = 4, message = "account number is too short"))]
    pub account_number: String,
    pub bank_name: String,
    #[validate(length(equal = 11, message = "IFSC code must be 11 characters"))]
    pub ifsc_code: String,
}

impl BankDetails {
    /// Account number with all but the last four digits hidden
    pub fn masked_account_number(&self) -> String {
        let chars: Vec<char> = self.account_number.chars().collect();
        let visible = chars.len().min(4);
        let hidden = chars.len() - visible;
        let tail: String = chars[hidden..].iter().collect();
        format!("{}{}", "X".repeat(hidden), tail)
    }
}

/// An investor who can place mutual-fund orders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    /// Permanent Account Number
    #[validate(length(equal = 10, message = "PAN must be 10 characters"))]
    pub pan_card: String,
    #[validate(email(message = "email address is malformed"))]
    pub email: String,
    pub phone: String,
    pub kyc_status: KycStatus,
    #[validate(nested)]
    pub bank_details: BankDetails,
}

impl Client {
    /// Whether an order may be submitted for this client
    pub fn can_transact(&self) -> bool {
        self.kyc_status.allows_transactions()
    }

    /// Ensures the client is KYC verified
    pub fn ensure_can_transact(&self) -> Result<(), ClientError> {
        if self.can_transact() {
            Ok(())
        } else {
            Err(ClientError::KycNotVerified(self.kyc_status.to_string()))
        }
    }

    /// Warning shown when the client cannot transact, naming the actual status
    pub fn kyc_warning(&self) -> Option<String> {
        self.ensure_can_transact().err().map(|e| e.to_string())
    }

    /// Sanity check of the record's contact and bank fields
    ///
    /// Malformed records are still selectable; callers surface the result as
    /// a warning.
    pub fn check(&self) -> Result<(), ClientError> {
        self.validate()
            .map_err(|errors| ClientError::InvalidData(errors.to_string()))
    }
}

impl Searchable for Client {
    fn search_key(&self) -> &str {
        self.id.as_str()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.pan_card, &self.email]
    }
}
