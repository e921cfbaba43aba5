//! Holdings and portfolios
//!
//! A holding's current value and gain/loss are derived from units × NAV.
//! They are read through accessors and only change through `revalue`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::SchemeCode;
use crate::{round_half_up, CURRENCY_PRECISION};

/// An investor's units in one scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    scheme_code: SchemeCode,
    #[serde(default)]
    scheme_name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    units: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    current_value: Decimal,
    #[serde(default, serialize_with = "rust_decimal::serde::float::serialize")]
    average_nav: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    invested_amount: Decimal,
    #[serde(default, serialize_with = "rust_decimal::serde::float::serialize")]
    gain_loss: Decimal,
    #[serde(default, serialize_with = "rust_decimal::serde::float::serialize")]
    gain_loss_percentage: Decimal,
}

impl Holding {
    /// Creates a holding valued at the given NAV
    pub fn new(
        scheme_code: SchemeCode,
        scheme_name: impl Into<String>,
        units: Decimal,
        invested_amount: Decimal,
        nav: Decimal,
    ) -> Self {
        let average_nav = invested_amount.checked_div(units).unwrap_or(Decimal::ZERO);
        let mut holding = Self {
            scheme_code,
            scheme_name: scheme_name.into(),
            units,
            current_value: Decimal::ZERO,
            average_nav,
            invested_amount,
            gain_loss: Decimal::ZERO,
            gain_loss_percentage: Decimal::ZERO,
        };
        holding.revalue(nav);
        holding
    }

    /// Recomputes current value and gain/loss from units × NAV
    ///
    /// Values beyond the decimal range saturate; a percentage that cannot
    /// be represented is reported as zero.
    pub fn revalue(&mut self, nav: Decimal) {
        let value = self
            .units
            .checked_mul(nav)
            .unwrap_or_else(|| saturate(self.units.is_sign_negative() != nav.is_sign_negative()));
        self.current_value = round_half_up(value, CURRENCY_PRECISION);
        self.gain_loss = self.current_value.saturating_sub(self.invested_amount);
        self.gain_loss_percentage = self
            .gain_loss
            .checked_div(self.invested_amount)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map(|pct| round_half_up(pct, CURRENCY_PRECISION))
            .unwrap_or(Decimal::ZERO);
    }

    pub fn scheme_code(&self) -> &SchemeCode {
        &self.scheme_code
    }

    pub fn scheme_name(&self) -> &str {
        &self.scheme_name
    }

    pub fn units(&self) -> Decimal {
        self.units
    }

    pub fn current_value(&self) -> Decimal {
        self.current_value
    }

    pub fn average_nav(&self) -> Decimal {
        self.average_nav
    }

    pub fn invested_amount(&self) -> Decimal {
        self.invested_amount
    }

    pub fn gain_loss(&self) -> Decimal {
        self.gain_loss
    }

    pub fn gain_loss_percentage(&self) -> Decimal {
        self.gain_loss_percentage
    }

    /// Whether the holding is showing a profit (or breaking even)
    pub fn is_in_profit(&self) -> bool {
        self.gain_loss >= Decimal::ZERO
    }
}

/// All holdings of one client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Portfolio {
    holdings: Vec<Holding>,
}

impl Portfolio {
    pub fn new(holdings: Vec<Holding>) -> Self {
        Self { holdings }
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Finds the holding for a scheme
    ///
    /// Linear scan; portfolios hold a handful of schemes.
    pub fn holding_for(&self, scheme_code: &SchemeCode) -> Option<&Holding> {
        self.holdings.iter().find(|h| &h.scheme_code == scheme_code)
    }

    pub fn total_current_value(&self) -> Decimal {
        self.holdings
            .iter()
            .map(Holding::current_value)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    pub fn total_invested(&self) -> Decimal {
        self.holdings
            .iter()
            .map(Holding::invested_amount)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}

fn saturate(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

impl From<Vec<Holding>> for Portfolio {
    fn from(holdings: Vec<Holding>) -> Self {
        Self::new(holdings)
    }
}
