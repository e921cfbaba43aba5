//! CLI error handling

use thiserror::Error;

use core_kernel::EnvelopeFailure;
use domain_transaction::{FilterError, SubmitError, WorkflowError};
use infra_gateway::GatewayError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    #[error("{0}")]
    Workflow(#[from] WorkflowError),

    #[error("Order not placed: {0}")]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    /// A read call came back with a failure envelope
    #[error("{0}")]
    Remote(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<EnvelopeFailure> for CliError {
    fn from(failure: EnvelopeFailure) -> Self {
        CliError::Remote(failure.to_string())
    }
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Submit(SubmitError::Validation(_)) => 2,
            CliError::Submit(SubmitError::Rejected(_)) => 3,
            CliError::Workflow(WorkflowError::KycNotVerified { .. }) => 4,
            _ => 1,
        }
    }
}
