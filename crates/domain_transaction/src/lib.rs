//! Order Desk Domain
//!
//! Everything between the investor-facing screens and the brokerage:
//!
//! - **Brokerage port**: the async contract every adapter implements
//! - **Forms**: purchase, redeem and switch orders with local validation
//! - **Pickers**: searchable client and scheme lists
//! - **History**: a client's transactions with local filters
//! - **Workflow**: SELECTION → TRANSACTION → SUCCESS, with HISTORY on the side
//!
//! Local validation failures never reach the port. Remote failures arrive
//! as envelopes and are surfaced verbatim.

pub mod ports;
pub mod validation;
pub mod fetch;
pub mod quantity;
pub mod form;
pub mod purchase;
pub mod redeem;
pub mod switch;
pub mod picker;
pub mod history;
pub mod workflow;
pub mod error;

#[cfg(test)]
mod testing;

pub use ports::BrokeragePort;
pub use validation::{Field, FieldError, FieldErrors, ValidationCode};
pub use fetch::{FetchGeneration, FetchTicket};
pub use quantity::QuantityInput;
pub use form::{HoldingSlot, HoldingState, TransactionForm};
pub use purchase::PurchaseForm;
pub use redeem::RedeemForm;
pub use switch::SwitchForm;
pub use picker::{ClientPicker, Picker, PickerState, SchemePicker};
pub use history::{Choice, DateWindow, HistoryFilter, HistoryState, HistoryView};
pub use workflow::{View, Workflow};
pub use error::{FilterError, SubmitError, WorkflowError};

#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{MockBrokeragePort, Submission};
