//! Core Kernel - Foundational types shared by the transaction desk
//!
//! This crate provides the building blocks used across all domain modules:
//! - Identifiers issued by the brokerage
//! - The uniform `{success, data, message, errorCode}` response envelope
//! - Port error and health types for adapters
//! - Local search matching

pub mod identifiers;
pub mod envelope;
pub mod ports;
pub mod search;
pub mod error;

pub use identifiers::{ClientId, SchemeCode, TransactionId, OrderNumber};
pub use envelope::{
    ApiResponse, EnvelopeFailure,
    NETWORK_ERROR_CODE, NETWORK_ERROR_MESSAGE, FALLBACK_FAILURE_MESSAGE,
};
pub use ports::{
    PortError, DomainPort, AdapterHealth, HealthCheckResult, HealthCheckable,
    OperationMetadata,
};
pub use search::{Searchable, matches_term};
pub use error::CoreError;
