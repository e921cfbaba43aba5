//! Fund domain errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the fund domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FundError {
    #[error("Scheme not found: {0}")]
    SchemeNotFound(String),

    #[error("Scheme {scheme_code} has non-positive NAV {nav}")]
    InvalidNav { scheme_code: String, nav: Decimal },

    #[error("Scheme {scheme_code} has minimum {min} above maximum {max}")]
    InvalidAmountBounds { scheme_code: String, min: Decimal, max: Decimal },

    #[error("No holding in scheme {0}")]
    HoldingNotFound(String),

    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },
}

impl FundError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        FundError::UnknownVariant {
            kind,
            value: value.to_string(),
        }
    }
}
