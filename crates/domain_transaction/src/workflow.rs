//! Workflow orchestrator
//!
//! ```text
//!   SELECTION ──begin_transaction──▶ TRANSACTION ──complete──▶ SUCCESS
//!      ▲  │                              │                       │
//!      │  └──────open_history──┐         └──cancel──▶ SELECTION  │
//!      │                       ▼                                 │
//!      └──close_history──── HISTORY ◀────────open_history────────┘
//! ```
//!
//! Entering TRANSACTION requires a client, a scheme (and a destination
//! scheme for a switch) and a KYC-verified client.

use std::fmt;
use tracing::info;

use core_kernel::TransactionId;
use domain_client::Client;
use domain_fund::{Scheme, Transaction, TransactionType};

use crate::error::WorkflowError;
use crate::form::TransactionForm;
use crate::history::HistoryView;
use crate::purchase::PurchaseForm;
use crate::redeem::RedeemForm;
use crate::switch::SwitchForm;

/// The screen the desk is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Selection,
    Transaction,
    History,
    Success,
}

impl View {
    fn can_transition_to(self, target: View) -> bool {
        use View::*;
        matches!(
            (self, target),
            (Selection, Transaction) |
            (Selection, History) |
            (Transaction, Selection) |
            (Transaction, Success) |
            (Success, History) |
            (Success, Selection) |
            (History, Selection)
        )
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Selection => "SELECTION",
            View::Transaction => "TRANSACTION",
            View::History => "HISTORY",
            View::Success => "SUCCESS",
        };
        f.write_str(name)
    }
}

/// Selections and view of one desk session
#[derive(Debug)]
pub struct Workflow {
    view: View,
    client: Option<Client>,
    scheme: Option<Scheme>,
    target_scheme: Option<Scheme>,
    transaction_type: TransactionType,
    completed: Option<Transaction>,
}

impl Default for Workflow {
    fn default() -> Self {
        Self {
            view: View::Selection,
            client: None,
            scheme: None,
            target_scheme: None,
            transaction_type: TransactionType::Purchase,
            completed: None,
        }
    }
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    pub fn scheme(&self) -> Option<&Scheme> {
        self.scheme.as_ref()
    }

    pub fn target_scheme(&self) -> Option<&Scheme> {
        self.target_scheme.as_ref()
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    /// The order placed, while in SUCCESS
    pub fn completed(&self) -> Option<&Transaction> {
        self.completed.as_ref()
    }

    pub fn success_transaction_id(&self) -> Option<&TransactionId> {
        self.completed.as_ref().map(|t| &t.id)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn select_client(&mut self, client: Client) -> Result<(), WorkflowError> {
        self.ensure_view(View::Selection)?;
        info!(client_id = %client.id, kyc_status = %client.kyc_status, "Client selected");
        self.client = Some(client);
        Ok(())
    }

    pub fn select_scheme(&mut self, scheme: Scheme) -> Result<(), WorkflowError> {
        self.ensure_view(View::Selection)?;
        info!(scheme_code = %scheme.scheme_code, "Scheme selected");
        self.scheme = Some(scheme);
        Ok(())
    }

    /// Destination scheme of a switch
    pub fn select_target_scheme(&mut self, scheme: Scheme) -> Result<(), WorkflowError> {
        self.ensure_view(View::Selection)?;
        info!(scheme_code = %scheme.scheme_code, "Destination scheme selected");
        self.target_scheme = Some(scheme);
        Ok(())
    }

    pub fn set_transaction_type(&mut self, transaction_type: TransactionType) -> Result<(), WorkflowError> {
        self.ensure_view(View::Selection)?;
        self.transaction_type = transaction_type;
        Ok(())
    }

    /// Why TRANSACTION cannot be entered yet, if anything
    pub fn check_proceed(&self) -> Result<(), WorkflowError> {
        let client = self.client.as_ref().ok_or(WorkflowError::MissingSelection("client"))?;
        if self.scheme.is_none() {
            return Err(WorkflowError::MissingSelection("scheme"));
        }
        if self.transaction_type == TransactionType::Switch && self.target_scheme.is_none() {
            return Err(WorkflowError::MissingSelection("destination scheme"));
        }
        if !client.can_transact() {
            return Err(WorkflowError::KycNotVerified {
                status: client.kyc_status,
            });
        }
        Ok(())
    }

    pub fn can_proceed(&self) -> bool {
        self.check_proceed().is_ok()
    }

    /// Warning for a selected client who cannot transact
    pub fn kyc_warning(&self) -> Option<String> {
        self.client.as_ref().and_then(Client::kyc_warning)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Enters TRANSACTION and hands out the form for the chosen type
    pub fn begin_transaction(&mut self) -> Result<TransactionForm, WorkflowError> {
        self.ensure_transition(View::Transaction)?;
        self.check_proceed()?;
        let form = self.build_form()?;
        self.transition(View::Transaction)?;
        Ok(form)
    }

    /// Back to SELECTION with the selections kept
    pub fn cancel_transaction(&mut self) -> Result<(), WorkflowError> {
        self.ensure_view(View::Transaction)?;
        self.transition(View::Selection)
    }

    /// Records the accepted order and shows SUCCESS
    pub fn complete(&mut self, transaction: Transaction) -> Result<(), WorkflowError> {
        self.ensure_view(View::Transaction)?;
        self.transition(View::Success)?;
        info!(transaction_id = %transaction.id, "Transaction completed");
        self.completed = Some(transaction);
        Ok(())
    }

    /// Opens the selected client's history
    pub fn open_history(&mut self) -> Result<HistoryView, WorkflowError> {
        self.ensure_transition(View::History)?;
        let client = self.client.as_ref().ok_or(WorkflowError::MissingSelection("client"))?;
        let view = HistoryView::new(client.id.clone());
        self.transition(View::History)?;
        Ok(view)
    }

    pub fn close_history(&mut self) -> Result<(), WorkflowError> {
        self.ensure_view(View::History)?;
        self.transition(View::Selection)
    }

    /// Discards every selection and returns to SELECTION
    pub fn start_over(&mut self) {
        info!(from = %self.view, "Starting over");
        *self = Self::new();
    }

    fn build_form(&self) -> Result<TransactionForm, WorkflowError> {
        let client = self.client.as_ref().ok_or(WorkflowError::MissingSelection("client"))?;
        let scheme = self.scheme.clone().ok_or(WorkflowError::MissingSelection("scheme"))?;
        let client_id = client.id.clone();
        let form = match self.transaction_type {
            TransactionType::Purchase => TransactionForm::Purchase(PurchaseForm::new(client_id, scheme)),
            TransactionType::Redeem => TransactionForm::Redeem(RedeemForm::new(client_id, scheme)),
            TransactionType::Switch => {
                let target = self
                    .target_scheme
                    .clone()
                    .ok_or(WorkflowError::MissingSelection("destination scheme"))?;
                TransactionForm::Switch(SwitchForm::new(client_id, scheme, target))
            }
        };
        Ok(form)
    }

    fn ensure_view(&self, expected: View) -> Result<(), WorkflowError> {
        if self.view == expected {
            Ok(())
        } else {
            Err(WorkflowError::WrongView {
                expected,
                actual: self.view,
            })
        }
    }

    fn ensure_transition(&self, to: View) -> Result<(), WorkflowError> {
        if self.view.can_transition_to(to) {
            Ok(())
        } else {
            Err(WorkflowError::InvalidTransition { from: self.view, to })
        }
    }

    fn transition(&mut self, to: View) -> Result<(), WorkflowError> {
        self.ensure_transition(to)?;
        info!(from = %self.view, %to, "Workflow transition");
        self.view = to;
        Ok(())
    }
}
