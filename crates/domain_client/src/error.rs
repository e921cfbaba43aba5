//! Client domain errors

use thiserror::Error;

/// Errors that can occur in the client domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    /// KYC status string not recognised
    #[error("Unknown KYC status: {0}")]
    UnknownKycStatus(String),

    /// Client is not allowed to transact
    #[error("Client's KYC status is {0}. Please complete KYC verification before proceeding.")]
    KycNotVerified(String),

    /// Client record failed the sanity check
    #[error("Invalid client data: {0}")]
    InvalidData(String),
}
