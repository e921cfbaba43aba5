//! Pieces shared by the order forms

use tracing::{debug, info, warn};

use core_kernel::{ApiResponse, ClientId, SchemeCode};
use domain_fund::{Holding, Portfolio, Transaction, TransactionType};

use crate::error::SubmitError;
use crate::fetch::{FetchGeneration, FetchTicket};
use crate::ports::BrokeragePort;
use crate::purchase::PurchaseForm;
use crate::redeem::RedeemForm;
use crate::switch::SwitchForm;
use crate::validation::FieldErrors;

/// Where a form's holding lookup stands
#[derive(Debug, Clone, PartialEq)]
pub enum HoldingState {
    Loading,
    /// No units of the scheme, or the portfolio could not be fetched
    Missing,
    Loaded(Holding),
}

/// The holding a redeem or switch order draws from
#[derive(Debug)]
pub struct HoldingSlot {
    client_id: ClientId,
    scheme_code: SchemeCode,
    state: HoldingState,
    generation: FetchGeneration,
}

impl HoldingSlot {
    pub fn new(client_id: ClientId, scheme_code: SchemeCode) -> Self {
        Self {
            client_id,
            scheme_code,
            state: HoldingState::Loading,
            generation: FetchGeneration::new(),
        }
    }

    pub fn state(&self) -> &HoldingState {
        &self.state
    }

    pub fn holding(&self) -> Option<&Holding> {
        match &self.state {
            HoldingState::Loaded(holding) => Some(holding),
            _ => None,
        }
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.state = HoldingState::Loading;
        self.generation.begin()
    }

    /// Applies a portfolio response; returns false if the fetch was superseded
    pub fn complete_fetch(&mut self, ticket: FetchTicket, envelope: ApiResponse<Portfolio>) -> bool {
        if !self.generation.is_current(ticket) {
            debug!(client_id = %self.client_id, "Discarding stale portfolio response");
            return false;
        }
        self.state = match envelope.into_result() {
            Ok(portfolio) => match portfolio.holding_for(&self.scheme_code) {
                Some(holding) => HoldingState::Loaded(holding.clone()),
                None => HoldingState::Missing,
            },
            Err(failure) => {
                warn!(client_id = %self.client_id, error = %failure, "Portfolio fetch failed");
                HoldingState::Missing
            }
        };
        true
    }

    /// Fetches the portfolio and picks out this scheme's holding
    pub async fn load(&mut self, port: &dyn BrokeragePort) {
        let ticket = self.begin_fetch();
        let envelope = port.portfolio(&self.client_id).await;
        self.complete_fetch(ticket, envelope);
    }

    /// The loaded holding, or why an order cannot be placed against it
    pub fn require(&self) -> Result<&Holding, SubmitError> {
        match &self.state {
            HoldingState::Loaded(holding) => Ok(holding),
            HoldingState::Loading => Err(SubmitError::HoldingLoading),
            HoldingState::Missing => Err(SubmitError::NoHolding),
        }
    }
}

/// Turns the brokerage's answer into the form outcome
///
/// A failure envelope becomes the form's general error, verbatim.
pub(crate) fn settle(
    envelope: ApiResponse<Transaction>,
    errors: &mut FieldErrors,
) -> Result<Transaction, SubmitError> {
    match envelope.into_result() {
        Ok(transaction) => {
            info!(transaction_id = %transaction.id, "Order accepted");
            errors.clear_all();
            Ok(transaction)
        }
        Err(failure) => {
            warn!(error = %failure, "Order rejected");
            errors.set_general(failure.message.clone());
            Err(SubmitError::Rejected(failure))
        }
    }
}

/// The form shown while the workflow is in the TRANSACTION view
#[derive(Debug)]
pub enum TransactionForm {
    Purchase(PurchaseForm),
    Redeem(RedeemForm),
    Switch(SwitchForm),
}

impl TransactionForm {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            TransactionForm::Purchase(_) => TransactionType::Purchase,
            TransactionForm::Redeem(_) => TransactionType::Redeem,
            TransactionForm::Switch(_) => TransactionType::Switch,
        }
    }

    /// Runs the fetches a form performs when it is first shown
    pub async fn mount(&mut self, port: &dyn BrokeragePort) {
        match self {
            TransactionForm::Purchase(_) => {}
            TransactionForm::Redeem(form) => form.load_holding(port).await,
            TransactionForm::Switch(form) => form.load_holding(port).await,
        }
    }

    pub async fn submit(&mut self, port: &dyn BrokeragePort) -> Result<Transaction, SubmitError> {
        match self {
            TransactionForm::Purchase(form) => form.submit(port).await,
            TransactionForm::Redeem(form) => form.submit(port).await,
            TransactionForm::Switch(form) => form.submit(port).await,
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        match self {
            TransactionForm::Purchase(form) => form.errors(),
            TransactionForm::Redeem(form) => form.errors(),
            TransactionForm::Switch(form) => form.errors(),
        }
    }
}
