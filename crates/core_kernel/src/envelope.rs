//! The uniform response envelope
//!
//! Every remote call answers with `{success, data?, message, errorCode?}`.
//! Transport failures are folded into the same shape, so callers branch on
//! `success` and never see a raised error from the gateway.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code reported when the remote system could not be reached
pub const NETWORK_ERROR_CODE: &str = "NETWORK_ERROR";

/// Message reported when the remote system could not be reached
pub const NETWORK_ERROR_MESSAGE: &str = "Network error occurred";

/// Message shown when a failed envelope carries no message of its own
pub const FALLBACK_FAILURE_MESSAGE: &str = "Transaction failed";

/// Response envelope returned by every brokerage operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Creates a successful envelope carrying data
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            error_code: None,
        }
    }

    /// Creates a remote rejection
    pub fn failure(message: impl Into<String>, error_code: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
            error_code,
        }
    }

    /// The envelope substituted for any transport failure
    pub fn network_error() -> Self {
        Self::failure(NETWORK_ERROR_MESSAGE, Some(NETWORK_ERROR_CODE.to_string()))
    }

    /// Returns true when this envelope stands for an unreachable remote
    pub fn is_network_error(&self) -> bool {
        !self.success && self.error_code.as_deref() == Some(NETWORK_ERROR_CODE)
    }

    /// Converts the envelope into a result
    ///
    /// A successful envelope without data is treated as a failure, since
    /// nothing downstream can act on it.
    pub fn into_result(self) -> Result<T, EnvelopeFailure> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(EnvelopeFailure::new(self.message, self.error_code)),
        }
    }

    /// Maps the payload, keeping the envelope metadata
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            data: self.data.map(f),
            message: self.message,
            error_code: self.error_code,
        }
    }
}

/// A failed envelope, ready to be shown to the user verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeFailure {
    pub message: String,
    pub error_code: Option<String>,
}

impl EnvelopeFailure {
    /// Creates a failure, substituting the fallback text for an empty message
    pub fn new(message: impl Into<String>, error_code: Option<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            FALLBACK_FAILURE_MESSAGE.to_string()
        } else {
            message
        };
        Self { message, error_code }
    }
}

impl fmt::Display for EnvelopeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_code {
            Some(code) => write!(f, "{} ({})", self.message, code),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for EnvelopeFailure {}
