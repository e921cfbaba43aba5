//! Switch order form
//!
//! Moves value from a held scheme into another scheme. The quantity rules
//! are those of a redemption, checked against the source holding.

use rust_decimal::Decimal;
use tracing::{info, instrument};

use core_kernel::{ApiResponse, ClientId};
use domain_fund::{estimate_units, OrderMode, Portfolio, Scheme, SwitchRequest, Transaction};

use crate::error::SubmitError;
use crate::fetch::FetchTicket;
use crate::form::{settle, HoldingSlot, HoldingState};
use crate::ports::BrokeragePort;
use crate::quantity::QuantityInput;
use crate::validation::{parse_decimal, Field, FieldErrors};

pub const SAME_SCHEME_MESSAGE: &str = "Choose a different destination scheme";

#[derive(Debug)]
pub struct SwitchForm {
    client_id: ClientId,
    from: Scheme,
    to: Scheme,
    holding: HoldingSlot,
    quantity: QuantityInput,
    errors: FieldErrors,
}

impl SwitchForm {
    pub fn new(client_id: ClientId, from: Scheme, to: Scheme) -> Self {
        let holding = HoldingSlot::new(client_id.clone(), from.scheme_code.clone());
        Self {
            client_id,
            from,
            to,
            holding,
            quantity: QuantityInput::new(),
            errors: FieldErrors::new(),
        }
    }

    pub fn from_scheme(&self) -> &Scheme {
        &self.from
    }

    pub fn to_scheme(&self) -> &Scheme {
        &self.to
    }

    pub fn holding_state(&self) -> &HoldingState {
        self.holding.state()
    }

    pub fn begin_holding_fetch(&mut self) -> FetchTicket {
        self.holding.begin_fetch()
    }

    pub fn complete_holding_fetch(&mut self, ticket: FetchTicket, envelope: ApiResponse<Portfolio>) -> bool {
        self.holding.complete_fetch(ticket, envelope)
    }

    pub async fn load_holding(&mut self, port: &dyn BrokeragePort) {
        self.holding.load(port).await;
    }

    pub fn mode(&self) -> OrderMode {
        self.quantity.mode()
    }

    pub fn set_mode(&mut self, mode: OrderMode) {
        self.quantity.set_mode(mode);
        self.errors.clear(Field::Amount);
        self.errors.clear(Field::Units);
    }

    pub fn amount(&self) -> &str {
        self.quantity.amount()
    }

    pub fn set_amount(&mut self, value: impl Into<String>) {
        self.quantity.set_amount(value);
        self.errors.clear(Field::Amount);
    }

    pub fn units(&self) -> &str {
        self.quantity.units()
    }

    pub fn set_units(&mut self, value: impl Into<String>) {
        self.quantity.set_units(value);
        self.errors.clear(Field::Units);
    }

    /// Source units the typed amount moves
    pub fn estimated_units(&self) -> Option<Decimal> {
        self.quantity.estimated_units(self.from.nav)
    }

    /// Value of the typed source units
    pub fn estimated_amount(&self) -> Option<Decimal> {
        self.quantity.estimated_amount(self.from.nav)
    }

    /// Destination units the switched value would buy
    pub fn estimated_target_units(&self) -> Option<Decimal> {
        let value = match self.quantity.mode() {
            OrderMode::Amount => parse_decimal(self.quantity.amount()),
            OrderMode::Units => self.estimated_amount(),
            OrderMode::All => self.holding.holding().map(|h| h.current_value()),
        }?;
        estimate_units(value, self.to.nav)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn prepare(&mut self) -> Result<SwitchRequest, SubmitError> {
        self.errors.clear_all();
        if self.from.scheme_code == self.to.scheme_code {
            self.errors.set_general(SAME_SCHEME_MESSAGE);
            return Err(SubmitError::Validation(self.errors.clone()));
        }
        let holding = self.holding.require()?;
        match self.quantity.resolve(holding) {
            Ok(quantity) => Ok(SwitchRequest::new(
                self.client_id.clone(),
                self.from.scheme_code.clone(),
                self.to.scheme_code.clone(),
                quantity,
            )),
            Err((field, error)) => {
                info!(from = %self.from.scheme_code, to = %self.to.scheme_code, %field, code = ?error.code, "Switch rejected locally");
                self.errors.insert(field, error);
                Err(SubmitError::Validation(self.errors.clone()))
            }
        }
    }

    #[instrument(skip(self, port), fields(client_id = %self.client_id, from = %self.from.scheme_code, to = %self.to.scheme_code))]
    pub async fn submit(&mut self, port: &dyn BrokeragePort) -> Result<Transaction, SubmitError> {
        let request = self.prepare()?;
        let envelope = port.switch(&request).await;
        settle(envelope, &mut self.errors)
    }
}
