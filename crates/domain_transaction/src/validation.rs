//! Local input validation
//!
//! Runs before any network call. Failures are keyed by field and never sent
//! to the brokerage.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use domain_fund::{format_fixed, Holding, Scheme, CURRENCY_PRECISION};

/// Form field an error is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Amount,
    Units,
    /// Form-level errors, including remote rejections
    General,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Amount => "amount",
            Field::Units => "units",
            Field::General => "general",
        };
        f.write_str(name)
    }
}

/// Machine-readable reason for a local validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationCode {
    InvalidAmount,
    AmountOutOfRange,
    AmountExceedsHolding,
    InvalidUnits,
    UnitsExceedHolding,
}

impl ValidationCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationCode::InvalidAmount => "INVALID_AMOUNT",
            ValidationCode::AmountOutOfRange => "AMOUNT_OUT_OF_RANGE",
            ValidationCode::AmountExceedsHolding => "AMOUNT_EXCEEDS_HOLDING",
            ValidationCode::InvalidUnits => "INVALID_UNITS",
            ValidationCode::UnitsExceedHolding => "UNITS_EXCEED_HOLDING",
        }
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message attached to a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub code: Option<ValidationCode>,
    pub message: String,
}

impl FieldError {
    pub fn new(code: ValidationCode, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }

    /// An error without a validation code, e.g. a remote rejection
    pub fn plain(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Errors currently shown on a form, at most one per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single-error set
    pub fn single(field: Field, error: FieldError) -> Self {
        let mut errors = Self::new();
        errors.insert(field, error);
        errors
    }

    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.errors.insert(field, error);
    }

    /// Sets the form-level message
    pub fn set_general(&mut self, message: impl Into<String>) {
        self.insert(Field::General, FieldError::plain(message));
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn message(&self, field: Field) -> Option<&str> {
        self.get(field).map(|e| e.message.as_str())
    }

    pub fn code(&self, field: Field) -> Option<ValidationCode> {
        self.get(field).and_then(|e| e.code)
    }

    pub fn clear(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    pub fn clear_all(&mut self) {
        self.errors.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, error)| format!("{}: {}", field, error))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Parses user input as a decimal number
///
/// Surrounding whitespace is ignored; anything else that is not a plain
/// decimal is rejected.
pub fn parse_decimal(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed).ok()
}

/// Renders an amount the way bounds are quoted in messages (`500`, `99.5`)
pub fn rupees(value: Decimal) -> String {
    format!("₹{}", value.normalize())
}

/// Validates a purchase amount against the scheme's bounds
pub fn validate_purchase_amount(input: &str, scheme: &Scheme) -> Result<Decimal, FieldError> {
    let amount = parse_decimal(input).ok_or_else(|| {
        FieldError::new(ValidationCode::InvalidAmount, "Please enter a valid amount")
    })?;
    if amount < scheme.min_amount {
        return Err(FieldError::new(
            ValidationCode::AmountOutOfRange,
            format!("Minimum amount is {}", rupees(scheme.min_amount)),
        ));
    }
    if amount > scheme.max_amount {
        return Err(FieldError::new(
            ValidationCode::AmountOutOfRange,
            format!("Maximum amount is {}", rupees(scheme.max_amount)),
        ));
    }
    Ok(amount)
}

/// Validates an amount to take out of a holding
pub fn validate_holding_amount(input: &str, holding: &Holding) -> Result<Decimal, FieldError> {
    let amount = parse_decimal(input).ok_or_else(|| {
        FieldError::new(ValidationCode::InvalidAmount, "Please enter a valid amount")
    })?;
    if amount <= Decimal::ZERO {
        return Err(FieldError::new(
            ValidationCode::InvalidAmount,
            "Amount must be greater than 0",
        ));
    }
    if amount > holding.current_value() {
        return Err(FieldError::new(
            ValidationCode::AmountExceedsHolding,
            format!(
                "Available amount is ₹{}",
                format_fixed(holding.current_value(), CURRENCY_PRECISION)
            ),
        ));
    }
    Ok(amount)
}

/// Validates a number of units to take out of a holding
pub fn validate_holding_units(input: &str, holding: &Holding) -> Result<Decimal, FieldError> {
    let units = parse_decimal(input).ok_or_else(|| {
        FieldError::new(ValidationCode::InvalidUnits, "Please enter valid units")
    })?;
    if units <= Decimal::ZERO {
        return Err(FieldError::new(
            ValidationCode::InvalidUnits,
            "Units must be greater than 0",
        ));
    }
    if units > holding.units() {
        return Err(FieldError::new(
            ValidationCode::UnitsExceedHolding,
            format!("Available units: {}", holding.units().normalize()),
        ));
    }
    Ok(units)
}
