//! The AMOUNT / UNITS / ALL input shared by redeem and switch orders

use rust_decimal::Decimal;

use domain_fund::{estimate_amount, estimate_units, Holding, OrderMode, OrderQuantity};

use crate::validation::{parse_decimal, validate_holding_amount, validate_holding_units, Field, FieldError};

/// Raw text typed into a redeem or switch form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuantityInput {
    mode: OrderMode,
    amount: String,
    units: String,
}

impl QuantityInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> OrderMode {
        self.mode
    }

    /// Switches mode, discarding both typed values
    pub fn set_mode(&mut self, mode: OrderMode) {
        self.mode = mode;
        self.amount.clear();
        self.units.clear();
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn set_amount(&mut self, value: impl Into<String>) {
        self.amount = value.into();
    }

    pub fn units(&self) -> &str {
        &self.units
    }

    pub fn set_units(&mut self, value: impl Into<String>) {
        self.units = value.into();
    }

    /// Units the typed amount would move at `nav`; AMOUNT mode only
    pub fn estimated_units(&self, nav: Decimal) -> Option<Decimal> {
        if self.mode != OrderMode::Amount {
            return None;
        }
        parse_decimal(&self.amount).and_then(|amount| estimate_units(amount, nav))
    }

    /// Value of the typed units at `nav`; UNITS mode only
    pub fn estimated_amount(&self, nav: Decimal) -> Option<Decimal> {
        if self.mode != OrderMode::Units {
            return None;
        }
        parse_decimal(&self.units).and_then(|units| estimate_amount(units, nav))
    }

    /// Checks the input against the holding and produces the order quantity
    pub fn resolve(&self, holding: &Holding) -> Result<OrderQuantity, (Field, FieldError)> {
        match self.mode {
            OrderMode::Amount => validate_holding_amount(&self.amount, holding)
                .map(OrderQuantity::Amount)
                .map_err(|e| (Field::Amount, e)),
            OrderMode::Units => validate_holding_units(&self.units, holding)
                .map(OrderQuantity::Units)
                .map_err(|e| (Field::Units, e)),
            OrderMode::All => Ok(OrderQuantity::All),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::SchemeCode;
    use rust_decimal_macros::dec;

    fn holding() -> Holding {
        Holding::new(SchemeCode::new("S1"), "Scheme", dec!(120), dec!(2400), dec!(25))
    }

    #[test]
    fn test_estimates_follow_mode() {
        let mut input = QuantityInput::new();
        input.set_amount("1000");
        assert_eq!(input.estimated_units(dec!(25)), Some(dec!(40)));
        assert_eq!(input.estimated_amount(dec!(25)), None);

        input.set_mode(OrderMode::Units);
        assert_eq!(input.amount(), "");
        input.set_units("10");
        assert_eq!(input.estimated_amount(dec!(25)), Some(dec!(250)));
        assert_eq!(input.estimated_units(dec!(25)), None);
    }

    #[test]
    fn test_all_then_amount_clears_estimates() {
        let mut input = QuantityInput::new();
        input.set_amount("1000");
        input.set_mode(OrderMode::All);
        input.set_mode(OrderMode::Amount);
        assert_eq!(input.estimated_units(dec!(25)), None);
    }

    #[test]
    fn test_resolve_all_ignores_typed_text() {
        let mut input = QuantityInput::new();
        input.set_mode(OrderMode::All);
        input.set_units("garbage");
        assert_eq!(input.resolve(&holding()), Ok(OrderQuantity::All));
    }

    #[test]
    fn test_resolve_reports_field() {
        let mut input = QuantityInput::new();
        input.set_mode(OrderMode::Units);
        input.set_units("150");
        let (field, error) = input.resolve(&holding()).unwrap_err();
        assert_eq!(field, Field::Units);
        assert_eq!(error.message, "Available units: 120");
    }
}
