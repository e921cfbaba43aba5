//! Order requests sent to the brokerage
//!
//! Requests are built from form state immediately before submission and
//! never stored. Redeem and switch orders carry exactly one of amount or
//! units, or neither for a full liquidation (`ALL`).
//!
//! Amounts and units go out as JSON floats because the brokerage reads
//! plain JavaScript numbers, so digits past about 15 significant places
//! are lost on the wire.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClientId, SchemeCode};
use crate::error::FundError;

/// How a purchase is paid for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMode {
    #[default]
    Netbanking,
    Upi,
    DebitCard,
}

impl FromStr for PaymentMode {
    type Err = FundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "NETBANKING" => Ok(PaymentMode::Netbanking),
            "UPI" => Ok(PaymentMode::Upi),
            "DEBIT_CARD" => Ok(PaymentMode::DebitCard),
            _ => Err(FundError::unknown("payment mode", s)),
        }
    }
}

/// Instalment frequency of a systematic investment plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SipFrequency {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl FromStr for SipFrequency {
    type Err = FundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MONTHLY" => Ok(SipFrequency::Monthly),
            "QUARTERLY" => Ok(SipFrequency::Quarterly),
            "YEARLY" => Ok(SipFrequency::Yearly),
            _ => Err(FundError::unknown("SIP frequency", s)),
        }
    }
}

/// Request to buy into a scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    client_id: ClientId,
    scheme_code: SchemeCode,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    amount: Decimal,
    payment_mode: PaymentMode,
    sip_flag: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sip_frequency: Option<SipFrequency>,
}

impl PurchaseRequest {
    /// Creates a purchase; `sip` is the frequency when the order is a SIP
    pub fn new(
        client_id: ClientId,
        scheme_code: SchemeCode,
        amount: Decimal,
        payment_mode: PaymentMode,
        sip: Option<SipFrequency>,
    ) -> Self {
        Self {
            client_id,
            scheme_code,
            amount,
            payment_mode,
            sip_flag: sip.is_some(),
            sip_frequency: sip,
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn scheme_code(&self) -> &SchemeCode {
        &self.scheme_code
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn payment_mode(&self) -> PaymentMode {
        self.payment_mode
    }

    pub fn sip_frequency(&self) -> Option<SipFrequency> {
        self.sip_frequency
    }
}

/// How much of a holding a redeem or switch order moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderMode {
    #[default]
    Amount,
    Units,
    All,
}

impl fmt::Display for OrderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderMode::Amount => "AMOUNT",
            OrderMode::Units => "UNITS",
            OrderMode::All => "ALL",
        };
        f.write_str(label)
    }
}

/// A mode together with its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderQuantity {
    Amount(Decimal),
    Units(Decimal),
    /// Liquidate the whole holding
    All,
}

impl OrderQuantity {
    pub fn mode(&self) -> OrderMode {
        match self {
            OrderQuantity::Amount(_) => OrderMode::Amount,
            OrderQuantity::Units(_) => OrderMode::Units,
            OrderQuantity::All => OrderMode::All,
        }
    }

    fn amount(&self) -> Option<Decimal> {
        match self {
            OrderQuantity::Amount(amount) => Some(*amount),
            _ => None,
        }
    }

    fn units(&self) -> Option<Decimal> {
        match self {
            OrderQuantity::Units(units) => Some(*units),
            _ => None,
        }
    }

    fn from_parts(mode: OrderMode, amount: Option<Decimal>, units: Option<Decimal>) -> Option<Self> {
        match (mode, amount, units) {
            (OrderMode::Amount, Some(amount), None) => Some(OrderQuantity::Amount(amount)),
            (OrderMode::Units, None, Some(units)) => Some(OrderQuantity::Units(units)),
            (OrderMode::All, None, None) => Some(OrderQuantity::All),
            _ => None,
        }
    }
}

/// Request to sell units of a scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRequest {
    client_id: ClientId,
    scheme_code: SchemeCode,
    redeem_type: OrderMode,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    amount: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    units: Option<Decimal>,
}

impl RedeemRequest {
    pub fn new(client_id: ClientId, scheme_code: SchemeCode, quantity: OrderQuantity) -> Self {
        Self {
            client_id,
            scheme_code,
            redeem_type: quantity.mode(),
            amount: quantity.amount(),
            units: quantity.units(),
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn scheme_code(&self) -> &SchemeCode {
        &self.scheme_code
    }

    pub fn mode(&self) -> OrderMode {
        self.redeem_type
    }

    pub fn amount(&self) -> Option<Decimal> {
        self.amount
    }

    pub fn units(&self) -> Option<Decimal> {
        self.units
    }

    /// The quantity, or `None` if a deserialized request is inconsistent
    pub fn quantity(&self) -> Option<OrderQuantity> {
        OrderQuantity::from_parts(self.redeem_type, self.amount, self.units)
    }
}

/// Request to move a holding from one scheme to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchRequest {
    client_id: ClientId,
    from_scheme_code: SchemeCode,
    to_scheme_code: SchemeCode,
    switch_type: OrderMode,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    amount: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    units: Option<Decimal>,
}

impl SwitchRequest {
    pub fn new(
        client_id: ClientId,
        from_scheme_code: SchemeCode,
        to_scheme_code: SchemeCode,
        quantity: OrderQuantity,
    ) -> Self {
        Self {
            client_id,
            from_scheme_code,
            to_scheme_code,
            switch_type: quantity.mode(),
            amount: quantity.amount(),
            units: quantity.units(),
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn from_scheme_code(&self) -> &SchemeCode {
        &self.from_scheme_code
    }

    pub fn to_scheme_code(&self) -> &SchemeCode {
        &self.to_scheme_code
    }

    pub fn mode(&self) -> OrderMode {
        self.switch_type
    }

    pub fn amount(&self) -> Option<Decimal> {
        self.amount
    }

    pub fn units(&self) -> Option<Decimal> {
        self.units
    }

    pub fn quantity(&self) -> Option<OrderQuantity> {
        OrderQuantity::from_parts(self.switch_type, self.amount, self.units)
    }
}
