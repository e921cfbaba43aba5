//! Fund Domain
//!
//! Mutual-fund schemes, an investor's holdings, transaction records and
//! the order requests sent to the brokerage.
//!
//! # Key Concepts
//!
//! - **Scheme**: a fund offered by an AMC, priced daily at its NAV
//! - **NAV**: Net Asset Value per unit
//! - **Holding**: an investor's units in one scheme
//! - **Transaction**: an order as recorded by the brokerage
//!
//! # Estimates
//!
//! Unit and amount estimates shown next to an order form are hints only:
//! - Amount: ₹1,000
//! - NAV: ₹25
//! - Estimated units: 40.0000
//!
//! The brokerage allots the real units at the NAV of the execution date.

pub mod scheme;
pub mod holding;
pub mod transaction;
pub mod request;
pub mod error;

pub use scheme::{Scheme, RiskLevel};
pub use holding::{Holding, Portfolio};
pub use transaction::{Transaction, TransactionType, TransactionStatus};
pub use request::{
    PurchaseRequest, RedeemRequest, SwitchRequest,
    PaymentMode, SipFrequency, OrderMode, OrderQuantity,
};
pub use error::FundError;

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places shown for unit estimates
pub const UNIT_DISPLAY_PRECISION: u32 = 4;

/// Decimal places shown for currency amounts
pub const CURRENCY_PRECISION: u32 = 2;

/// Rounds half away from zero, the way amounts are printed on statements
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Estimates the units an amount buys at a given NAV
///
/// Returns `None` when the NAV is not positive or the quotient does not fit
/// in a `Decimal`.
///
/// # Example
///
/// ```rust
/// use domain_fund::estimate_units;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(estimate_units(dec!(1000), dec!(25)), Some(dec!(40.0000)));
/// ```
pub fn estimate_units(amount: Decimal, nav: Decimal) -> Option<Decimal> {
    if nav <= Decimal::ZERO {
        return None;
    }
    amount
        .checked_div(nav)
        .map(|units| round_half_up(units, UNIT_DISPLAY_PRECISION))
}

/// Estimates the value of units at a given NAV, to currency precision
///
/// Returns `None` when the NAV is not positive or the product overflows.
pub fn estimate_amount(units: Decimal, nav: Decimal) -> Option<Decimal> {
    if nav <= Decimal::ZERO {
        return None;
    }
    units
        .checked_mul(nav)
        .map(|amount| round_half_up(amount, CURRENCY_PRECISION))
}

/// Renders a value with exactly `dp` decimal places
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    let rounded = round_half_up(value, dp);
    format!("{:.*}", dp as usize, rounded)
}
