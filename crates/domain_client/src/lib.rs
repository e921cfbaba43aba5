//! Client Domain
//!
//! Investors as the brokerage describes them: identity, PAN, contact
//! details, KYC status and the registered bank account.
//!
//! Only clients whose KYC status is `VERIFIED` may place orders. The desk
//! never changes a client record; it only reads and displays it.

pub mod client;
pub mod kyc;
pub mod error;

pub use client::{Client, BankDetails};
pub use kyc::KycStatus;
pub use error::ClientError;
