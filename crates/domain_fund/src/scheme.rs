//! Scheme definition
//!
//! A scheme is a single mutual fund plan that can be bought, redeemed or
//! switched. Its code is the unique key used in every order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{SchemeCode, Searchable};
use crate::error::FundError;

/// Risk classification of a scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// Capital preservation
    Low,
    /// Balanced growth
    Moderate,
    /// Aggressive growth
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
        };
        f.write_str(label)
    }
}

/// A mutual fund scheme offered through the brokerage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheme {
    /// Unique scheme code
    pub scheme_code: SchemeCode,
    /// Scheme name
    pub scheme_name: String,
    /// Sponsoring asset management company code
    pub amc_code: String,
    /// Sponsoring asset management company name
    pub amc_name: String,
    /// Net asset value per unit
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub nav: Decimal,
    /// Smallest amount accepted for a purchase
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub min_amount: Decimal,
    /// Largest amount accepted for a purchase
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub max_amount: Decimal,
    /// Fund category, e.g. "Large Cap"
    pub category: String,
    /// Risk level
    pub risk_level: RiskLevel,
}

impl Scheme {
    /// Checks the pricing invariants: NAV > 0 and min ≤ max
    pub fn check_invariants(&self) -> Result<(), FundError> {
        if self.nav <= Decimal::ZERO {
            return Err(FundError::InvalidNav {
                scheme_code: self.scheme_code.to_string(),
                nav: self.nav,
            });
        }
        if self.min_amount > self.max_amount {
            return Err(FundError::InvalidAmountBounds {
                scheme_code: self.scheme_code.to_string(),
                min: self.min_amount,
                max: self.max_amount,
            });
        }
        Ok(())
    }

    /// Whether a purchase amount lies within the scheme's bounds (inclusive)
    pub fn amount_in_range(&self, amount: Decimal) -> bool {
        amount >= self.min_amount && amount <= self.max_amount
    }
}

impl Searchable for Scheme {
    fn search_key(&self) -> &str {
        self.scheme_code.as_str()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.scheme_name, &self.amc_name, &self.category]
    }
}
