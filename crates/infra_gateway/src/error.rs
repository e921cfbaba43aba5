//! Gateway construction errors
//!
//! Remote calls never fail with these; they answer with envelopes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("HTTP client could not be built: {0}")]
    Client(#[from] reqwest::Error),
}
