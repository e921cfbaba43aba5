//! Transaction history view
//!
//! The full history of one client is fetched once; every filter is a pure
//! predicate evaluated locally and the predicates are combined with AND.
//!
//! # Filters
//!
//! | Filter  | Passes when                                              |
//! |---------|----------------------------------------------------------|
//! | kind    | `All`, or the transaction type matches                   |
//! | status  | `All`, or the status matches                             |
//! | search  | blank, or scheme code / order number contains the term   |
//! | window  | `All`, or whole days since the timestamp ≤ `n`           |

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use core_kernel::{matches_term, ApiResponse, ClientId};
use domain_fund::{Transaction, TransactionStatus, TransactionType};

use crate::error::FilterError;
use crate::fetch::{FetchGeneration, FetchTicket};
use crate::ports::BrokeragePort;

/// Either no constraint or one required value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::All
    }
}

impl<T: PartialEq> Choice<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => wanted == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }
}

impl<T: FromStr> Choice<T> {
    /// Parses `ALL` (any case) or a value of `T`
    pub fn parse(input: &str, kind: &'static str) -> Result<Self, FilterError> {
        if input.trim().eq_ignore_ascii_case("ALL") {
            return Ok(Choice::All);
        }
        input
            .parse()
            .map(Choice::Only)
            .map_err(|_| FilterError::UnknownChoice {
                kind,
                value: input.to_string(),
            })
    }
}

impl<T: fmt::Display> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => f.write_str("ALL"),
            Choice::Only(value) => value.fmt(f),
        }
    }
}

/// How far back the history reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    All,
    Days(u32),
}

impl DateWindow {
    /// Windows offered to the user
    pub const PRESETS: [DateWindow; 4] = [
        DateWindow::Days(7),
        DateWindow::Days(30),
        DateWindow::Days(90),
        DateWindow::All,
    ];

    pub fn contains(&self, transaction: &Transaction, now: DateTime<Utc>) -> bool {
        match self {
            DateWindow::All => true,
            DateWindow::Days(days) => transaction.days_since(now) <= i64::from(*days),
        }
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        DateWindow::Days(30)
    }
}

impl FromStr for DateWindow {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("ALL") {
            return Ok(DateWindow::All);
        }
        trimmed
            .parse::<u32>()
            .map(DateWindow::Days)
            .map_err(|_| FilterError::InvalidDateWindow(s.to_string()))
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateWindow::All => f.write_str("ALL"),
            DateWindow::Days(days) => write!(f, "{}", days),
        }
    }
}

pub fn type_matches(kind: Choice<TransactionType>, transaction: &Transaction) -> bool {
    kind.admits(&transaction.transaction_type)
}

pub fn status_matches(status: Choice<TransactionStatus>, transaction: &Transaction) -> bool {
    status.admits(&transaction.status)
}

/// Case-insensitive match against scheme code and order number
pub fn search_matches(term: &str, transaction: &Transaction) -> bool {
    let mut fields = vec![transaction.scheme_code.as_str()];
    if let Some(order_number) = &transaction.order_number {
        fields.push(order_number.as_str());
    }
    matches_term(fields, term)
}

pub fn window_matches(window: DateWindow, transaction: &Transaction, now: DateTime<Utc>) -> bool {
    window.contains(transaction, now)
}

/// The filters currently applied to a history list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryFilter {
    pub kind: Choice<TransactionType>,
    pub status: Choice<TransactionStatus>,
    pub search: String,
    pub window: DateWindow,
}

impl HistoryFilter {
    pub fn matches(&self, transaction: &Transaction, now: DateTime<Utc>) -> bool {
        type_matches(self.kind, transaction)
            && status_matches(self.status, transaction)
            && search_matches(&self.search, transaction)
            && window_matches(self.window, transaction, now)
    }

    pub fn apply<'a>(&self, transactions: &'a [Transaction], now: DateTime<Utc>) -> Vec<&'a Transaction> {
        transactions
            .iter()
            .filter(|t| self.matches(t, now))
            .collect()
    }

    /// Whether an empty result should suggest loosening the filters
    ///
    /// The date window is not counted; it always has a value.
    pub fn has_active_filters(&self) -> bool {
        !self.search.trim().is_empty() || !self.kind.is_all() || !self.status.is_all()
    }
}

/// Load state of the history list
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryState {
    Loading,
    Ready,
    /// The fetch failed; the list is empty
    Failed(String),
}

/// One client's transaction history with its filters
#[derive(Debug)]
pub struct HistoryView {
    client_id: ClientId,
    transactions: Vec<Transaction>,
    state: HistoryState,
    filter: HistoryFilter,
    generation: FetchGeneration,
}

impl HistoryView {
    pub fn new(client_id: ClientId) -> Self {
        Self {
            client_id,
            transactions: Vec::new(),
            state: HistoryState::Loading,
            filter: HistoryFilter::default(),
            generation: FetchGeneration::new(),
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn state(&self) -> &HistoryState {
        &self.state
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn filter(&self) -> &HistoryFilter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut HistoryFilter {
        &mut self.filter
    }

    /// Points the view at another client; the old client's fetch is dropped
    pub fn change_client(&mut self, client_id: ClientId) {
        if client_id == self.client_id {
            return;
        }
        self.generation.invalidate();
        self.client_id = client_id;
        self.transactions.clear();
        self.state = HistoryState::Loading;
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.state = HistoryState::Loading;
        self.generation.begin()
    }

    /// Applies a history response; returns false if the fetch was superseded
    pub fn complete_fetch(&mut self, ticket: FetchTicket, envelope: ApiResponse<Vec<Transaction>>) -> bool {
        if !self.generation.is_current(ticket) {
            debug!(client_id = %self.client_id, "Discarding stale history response");
            return false;
        }
        match envelope.into_result() {
            Ok(transactions) => {
                self.transactions = transactions;
                self.state = HistoryState::Ready;
            }
            Err(failure) => {
                warn!(client_id = %self.client_id, error = %failure, "History fetch failed");
                self.transactions.clear();
                self.state = HistoryState::Failed(failure.message);
            }
        }
        true
    }

    pub async fn load(&mut self, port: &dyn BrokeragePort) {
        let ticket = self.begin_fetch();
        let envelope = port.transaction_history(&self.client_id).await;
        self.complete_fetch(ticket, envelope);
    }

    /// Transactions passing every filter, in fetched order
    pub fn visible(&self, now: DateTime<Utc>) -> Vec<&Transaction> {
        self.filter.apply(&self.transactions, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use core_kernel::{OrderNumber, SchemeCode, TransactionId};

    fn tx(id: &str, kind: TransactionType, status: TransactionStatus, age_days: i64, now: DateTime<Utc>) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            client_id: ClientId::new("CL001"),
            transaction_type: kind,
            scheme_code: SchemeCode::new("AXIS001"),
            amount: None,
            units: None,
            status,
            order_number: Some(OrderNumber::new(format!("ORD-{}", id))),
            timestamp: now - Duration::days(age_days),
            remarks: None,
        }
    }

    #[test]
    fn test_date_window_parse() {
        assert_eq!("ALL".parse::<DateWindow>(), Ok(DateWindow::All));
        assert_eq!(" 90 ".parse::<DateWindow>(), Ok(DateWindow::Days(90)));
        assert!(matches!(
            "last week".parse::<DateWindow>(),
            Err(FilterError::InvalidDateWindow(_))
        ));
        assert_eq!(DateWindow::default(), DateWindow::Days(30));
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let now = Utc::now();
        let window = DateWindow::Days(30);
        assert!(window.contains(&tx("1", TransactionType::Purchase, TransactionStatus::Success, 30, now), now));
        assert!(!window.contains(&tx("2", TransactionType::Purchase, TransactionStatus::Success, 31, now), now));
    }

    #[test]
    fn test_choice_parse() {
        assert_eq!(Choice::<TransactionType>::parse("all", "type"), Ok(Choice::All));
        assert_eq!(
            Choice::<TransactionType>::parse("redeem", "type"),
            Ok(Choice::Only(TransactionType::Redeem))
        );
        assert!(Choice::<TransactionStatus>::parse("DONE", "status").is_err());
    }

    #[test]
    fn test_search_matches_order_number() {
        let now = Utc::now();
        let t = tx("77", TransactionType::Switch, TransactionStatus::Pending, 1, now);
        assert!(search_matches("ord-77", &t));
        assert!(search_matches("axis", &t));
        assert!(!search_matches("hdfc", &t));
    }

    #[test]
    fn test_active_filters_ignore_window() {
        let mut filter = HistoryFilter::default();
        filter.window = DateWindow::Days(7);
        assert!(!filter.has_active_filters());
        filter.status = Choice::Only(TransactionStatus::Failed);
        assert!(filter.has_active_filters());
    }

    #[test]
    fn test_failed_fetch_leaves_empty_list() {
        let mut view = HistoryView::new(ClientId::new("CL001"));
        let ticket = view.begin_fetch();
        view.complete_fetch(ticket, ApiResponse::network_error());
        assert!(view.transactions().is_empty());
        assert_eq!(view.state(), &HistoryState::Failed("Network error occurred".to_string()));
    }

    #[test]
    fn test_change_client_drops_old_fetch() {
        let now = Utc::now();
        let mut view = HistoryView::new(ClientId::new("CL001"));
        let ticket = view.begin_fetch();
        view.change_client(ClientId::new("CL002"));
        let late = vec![tx("1", TransactionType::Purchase, TransactionStatus::Success, 1, now)];
        assert!(!view.complete_fetch(ticket, ApiResponse::ok(late, "")));
        assert!(view.transactions().is_empty());
        assert_eq!(view.state(), &HistoryState::Loading);
    }
}
