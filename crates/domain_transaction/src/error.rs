//! Transaction desk errors

use thiserror::Error;

use core_kernel::EnvelopeFailure;
use domain_client::KycStatus;

use crate::validation::FieldErrors;
use crate::workflow::View;

/// Errors raised by the workflow orchestrator
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Client's KYC status is {status}. Please complete KYC verification before proceeding.")]
    KycNotVerified { status: KycStatus },

    #[error("Please select a {0} first")]
    MissingSelection(&'static str),

    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition { from: View, to: View },

    #[error("Only allowed in the {expected} view, currently {actual}")]
    WrongView { expected: View, actual: View },
}

/// Why an order was not placed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// Local validation failed; nothing was sent
    #[error("{0}")]
    Validation(FieldErrors),

    /// The investor holds no units of the scheme
    #[error("No holdings found for this scheme")]
    NoHolding,

    /// The holding is still being fetched
    #[error("Holding details are still loading")]
    HoldingLoading,

    /// The brokerage answered with a failure envelope
    #[error("{0}")]
    Rejected(EnvelopeFailure),
}

impl SubmitError {
    /// Field errors, if this was a local validation failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            SubmitError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Errors parsing history filter input
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unrecognised date range: {0}")]
    InvalidDateWindow(String),

    #[error("Unrecognised {kind}: {value}")]
    UnknownChoice { kind: &'static str, value: String },
}
