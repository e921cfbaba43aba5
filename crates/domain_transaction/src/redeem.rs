//! Redemption order form

use rust_decimal::Decimal;
use tracing::{info, instrument};

use core_kernel::ClientId;
use domain_fund::{OrderMode, RedeemRequest, Scheme, Transaction};

use crate::error::SubmitError;
use crate::fetch::FetchTicket;
use crate::form::{settle, HoldingSlot, HoldingState};
use crate::ports::BrokeragePort;
use crate::quantity::QuantityInput;
use crate::validation::{Field, FieldErrors};

/// State of a redemption form for one client and scheme
#[derive(Debug)]
pub struct RedeemForm {
    client_id: ClientId,
    scheme: Scheme,
    holding: HoldingSlot,
    quantity: QuantityInput,
    errors: FieldErrors,
}

impl RedeemForm {
    pub fn new(client_id: ClientId, scheme: Scheme) -> Self {
        let holding = HoldingSlot::new(client_id.clone(), scheme.scheme_code.clone());
        Self {
            client_id,
            scheme,
            holding,
            quantity: QuantityInput::new(),
            errors: FieldErrors::new(),
        }
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn holding_state(&self) -> &HoldingState {
        self.holding.state()
    }

    pub fn begin_holding_fetch(&mut self) -> FetchTicket {
        self.holding.begin_fetch()
    }

    pub fn complete_holding_fetch(
        &mut self,
        ticket: FetchTicket,
        envelope: core_kernel::ApiResponse<domain_fund::Portfolio>,
    ) -> bool {
        self.holding.complete_fetch(ticket, envelope)
    }

    pub async fn load_holding(&mut self, port: &dyn BrokeragePort) {
        self.holding.load(port).await;
    }

    pub fn mode(&self) -> OrderMode {
        self.quantity.mode()
    }

    /// Changes mode; both inputs and their errors are cleared
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

    pub fn estimated_units(&self) -> Option<Decimal> {
        self.quantity.estimated_units(self.scheme.nav)
    }

    pub fn estimated_amount(&self) -> Option<Decimal> {
        self.quantity.estimated_amount(self.scheme.nav)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Validates against the holding and builds the request
    pub fn prepare(&mut self) -> Result<RedeemRequest, SubmitError> {
        self.errors.clear_all();
        let holding = self.holding.require()?;
        match self.quantity.resolve(holding) {
            Ok(quantity) => Ok(RedeemRequest::new(
                self.client_id.clone(),
                self.scheme.scheme_code.clone(),
                quantity,
            )),
            Err((field, error)) => {
                info!(scheme_code = %self.scheme.scheme_code, %field, code = ?error.code, "Redemption rejected locally");
                self.errors.insert(field, error);
                Err(SubmitError::Validation(self.errors.clone()))
            }
        }
    }

    #[instrument(skip(self, port), fields(client_id = %self.client_id, scheme_code = %self.scheme.scheme_code))]
    pub async fn submit(&mut self, port: &dyn BrokeragePort) -> Result<Transaction, SubmitError> {
        let request = self.prepare()?;
        let envelope = port.redeem(&request).await;
        settle(envelope, &mut self.errors)
    }
}
