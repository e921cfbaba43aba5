//! Brokerage Port
//!
//! The one seam between the desk and the remote order-routing system.
//!
//! # Architecture
//!
//! Every remote operation returns an [`ApiResponse`] envelope. Adapters never
//! return `Err` and never panic: transport and decoding failures become the
//! network-error envelope, remote rejections arrive as `success = false`
//! envelopes carrying the brokerage's message and error code.
//!
//! - **HTTP Adapter**: `infra_gateway::BseGateway`
//! - **Mock Adapter**: [`mock::MockBrokeragePort`], in-memory, for tests
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_transaction::ports::BrokeragePort;
//! use std::sync::Arc;
//!
//! async fn show_schemes(port: Arc<dyn BrokeragePort>) {
//!     match port.list_schemes().await.into_result() {
//!         Ok(schemes) => println!("{} schemes", schemes.len()),
//!         Err(failure) => eprintln!("{}", failure),
//!     }
//! }
//! ```

use async_trait::async_trait;

use core_kernel::{
    ApiResponse, ClientId, DomainPort, HealthCheckable, SchemeCode, TransactionId,
};
use domain_client::Client;
use domain_fund::{
    Portfolio, PurchaseRequest, RedeemRequest, Scheme, SwitchRequest, Transaction,
};

/// Remote brokerage operations
#[async_trait]
pub trait BrokeragePort: DomainPort + HealthCheckable {
    // ========================================================================
    // Session
    // ========================================================================

    /// Sets the bearer token sent with every subsequent call
    async fn set_auth_token(&self, token: String);

    // ========================================================================
    // Reference data
    // ========================================================================

    /// Lists every client visible to the desk
    async fn list_clients(&self) -> ApiResponse<Vec<Client>>;

    /// Retrieves one client
    async fn get_client(&self, id: &ClientId) -> ApiResponse<Client>;

    /// Lists every scheme on offer
    async fn list_schemes(&self) -> ApiResponse<Vec<Scheme>>;

    /// Retrieves one scheme
    async fn get_scheme(&self, code: &SchemeCode) -> ApiResponse<Scheme>;

    // ========================================================================
    // Orders
    // ========================================================================

    /// Places a purchase order
    async fn purchase(&self, request: &PurchaseRequest) -> ApiResponse<Transaction>;

    /// Places a redemption order
    async fn redeem(&self, request: &RedeemRequest) -> ApiResponse<Transaction>;

    /// Places a switch order
    async fn switch(&self, request: &SwitchRequest) -> ApiResponse<Transaction>;

    // ========================================================================
    // Queries
    // ========================================================================

    /// Every transaction recorded for a client
    async fn transaction_history(&self, client_id: &ClientId) -> ApiResponse<Vec<Transaction>>;

    /// Latest state of one transaction
    async fn transaction_status(&self, id: &TransactionId) -> ApiResponse<Transaction>;

    /// A client's current holdings
    async fn portfolio(&self, client_id: &ClientId) -> ApiResponse<Portfolio>;
}

/// Mock implementation of BrokeragePort for testing
///
/// Keeps everything in memory, counts calls and records submitted orders so
/// tests can assert that local validation never reached the network.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use core_kernel::{AdapterHealth, HealthCheckResult, OrderNumber};
    use domain_fund::{Holding, TransactionStatus, TransactionType};
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// An order that reached the mock
    #[derive(Debug, Clone, PartialEq)]
    pub enum Submission {
        Purchase(PurchaseRequest),
        Redeem(RedeemRequest),
        Switch(SwitchRequest),
    }

    #[derive(Debug, Default)]
    struct MockState {
        clients: Vec<Client>,
        schemes: Vec<Scheme>,
        portfolios: HashMap<ClientId, Vec<Holding>>,
        history: HashMap<ClientId, Vec<Transaction>>,
        offline: bool,
        rejection: Option<(String, Option<String>)>,
        submissions: Vec<Submission>,
        calls: usize,
        token: Option<String>,
        sequence: u64,
    }

    /// In-memory mock implementation of BrokeragePort
    #[derive(Debug, Default, Clone)]
    pub struct MockBrokeragePort {
        state: Arc<RwLock<MockState>>,
    }

    impl MockBrokeragePort {
        /// Creates an empty mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with clients
        pub async fn with_clients(self, clients: Vec<Client>) -> Self {
            self.state.write().await.clients = clients;
            self
        }

        /// Pre-populates with schemes
        pub async fn with_schemes(self, schemes: Vec<Scheme>) -> Self {
            self.state.write().await.schemes = schemes;
            self
        }

        /// Adds a holding to a client's portfolio
        pub async fn with_holding(self, client_id: ClientId, holding: Holding) -> Self {
            self.state
                .write()
                .await
                .portfolios
                .entry(client_id)
                .or_default()
                .push(holding);
            self
        }

        /// Pre-populates a client's transaction history
        pub async fn with_history(self, client_id: ClientId, transactions: Vec<Transaction>) -> Self {
            self.state.write().await.history.insert(client_id, transactions);
            self
        }

        /// Makes every call answer with the network-error envelope
        pub async fn set_offline(&self, offline: bool) {
            self.state.write().await.offline = offline;
        }

        /// Makes every order answer with a failure envelope
        pub async fn reject_orders(&self, message: impl Into<String>, error_code: Option<&str>) {
            self.state.write().await.rejection =
                Some((message.into(), error_code.map(str::to_string)));
        }

        /// Orders received so far, oldest first
        pub async fn submissions(&self) -> Vec<Submission> {
            self.state.read().await.submissions.clone()
        }

        /// Number of remote calls received (token changes excluded)
        pub async fn call_count(&self) -> usize {
            self.state.read().await.calls
        }

        /// Token most recently set
        pub async fn auth_token(&self) -> Option<String> {
            self.state.read().await.token.clone()
        }

        /// Counts the call and reports whether the mock is offline
        async fn enter(&self) -> bool {
            let mut state = self.state.write().await;
            state.calls += 1;
            state.offline
        }

        async fn place(
            &self,
            submission: Submission,
            client_id: &ClientId,
            transaction_type: TransactionType,
            scheme_code: &SchemeCode,
            amount: Option<Decimal>,
            units: Option<Decimal>,
        ) -> ApiResponse<Transaction> {
            if self.enter().await {
                return ApiResponse::network_error();
            }
            let mut state = self.state.write().await;
            state.submissions.push(submission);
            if let Some((message, code)) = state.rejection.clone() {
                return ApiResponse::failure(message, code);
            }

            state.sequence += 1;
            let transaction = Transaction {
                id: TransactionId::new(format!("TXN{:06}", state.sequence)),
                client_id: client_id.clone(),
                transaction_type,
                scheme_code: scheme_code.clone(),
                amount,
                units,
                status: TransactionStatus::Pending,
                order_number: Some(OrderNumber::new(format!("ORD{:06}", state.sequence))),
                timestamp: Utc::now(),
                remarks: None,
            };
            state
                .history
                .entry(client_id.clone())
                .or_default()
                .push(transaction.clone());
            ApiResponse::ok(transaction, "Order placed")
        }
    }

    impl DomainPort for MockBrokeragePort {}

    #[async_trait]
    impl HealthCheckable for MockBrokeragePort {
        async fn health_check(&self) -> HealthCheckResult {
            let offline = self.state.read().await.offline;
            HealthCheckResult {
                adapter_id: "mock-brokerage-port".to_string(),
                status: if offline {
                    AdapterHealth::Unhealthy
                } else {
                    AdapterHealth::Healthy
                },
                latency_ms: 0,
                message: Some("In-memory brokerage".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl BrokeragePort for MockBrokeragePort {
        async fn set_auth_token(&self, token: String) {
            self.state.write().await.token = Some(token);
        }

        async fn list_clients(&self) -> ApiResponse<Vec<Client>> {
            if self.enter().await {
                return ApiResponse::network_error();
            }
            ApiResponse::ok(self.state.read().await.clients.clone(), "")
        }

        async fn get_client(&self, id: &ClientId) -> ApiResponse<Client> {
            if self.enter().await {
                return ApiResponse::network_error();
            }
            match self.state.read().await.clients.iter().find(|c| &c.id == id) {
                Some(client) => ApiResponse::ok(client.clone(), ""),
                None => ApiResponse::failure("Client not found", Some("NOT_FOUND".to_string())),
            }
        }

        async fn list_schemes(&self) -> ApiResponse<Vec<Scheme>> {
            if self.enter().await {
                return ApiResponse::network_error();
            }
            ApiResponse::ok(self.state.read().await.schemes.clone(), "")
        }

        async fn get_scheme(&self, code: &SchemeCode) -> ApiResponse<Scheme> {
            if self.enter().await {
                return ApiResponse::network_error();
            }
            match self.state.read().await.schemes.iter().find(|s| &s.scheme_code == code) {
                Some(scheme) => ApiResponse::ok(scheme.clone(), ""),
                None => ApiResponse::failure("Scheme not found", Some("NOT_FOUND".to_string())),
            }
        }

        async fn purchase(&self, request: &PurchaseRequest) -> ApiResponse<Transaction> {
            self.place(
                Submission::Purchase(request.clone()),
                request.client_id(),
                TransactionType::Purchase,
                request.scheme_code(),
                Some(request.amount()),
                None,
            )
            .await
        }

        async fn redeem(&self, request: &RedeemRequest) -> ApiResponse<Transaction> {
            self.place(
                Submission::Redeem(request.clone()),
                request.client_id(),
                TransactionType::Redeem,
                request.scheme_code(),
                request.amount(),
                request.units(),
            )
            .await
        }

        async fn switch(&self, request: &SwitchRequest) -> ApiResponse<Transaction> {
            self.place(
                Submission::Switch(request.clone()),
                request.client_id(),
                TransactionType::Switch,
                request.from_scheme_code(),
                request.amount(),
                request.units(),
            )
            .await
        }

        async fn transaction_history(&self, client_id: &ClientId) -> ApiResponse<Vec<Transaction>> {
            if self.enter().await {
                return ApiResponse::network_error();
            }
            let history = self
                .state
                .read()
                .await
                .history
                .get(client_id)
                .cloned()
                .unwrap_or_default();
            ApiResponse::ok(history, "")
        }

        async fn transaction_status(&self, id: &TransactionId) -> ApiResponse<Transaction> {
            if self.enter().await {
                return ApiResponse::network_error();
            }
            let state = self.state.read().await;
            let found = state
                .history
                .values()
                .flatten()
                .find(|t| &t.id == id)
                .cloned();
            match found {
                Some(transaction) => ApiResponse::ok(transaction, ""),
                None => ApiResponse::failure(
                    "Transaction not found",
                    Some("NOT_FOUND".to_string()),
                ),
            }
        }

        async fn portfolio(&self, client_id: &ClientId) -> ApiResponse<Portfolio> {
            if self.enter().await {
                return ApiResponse::network_error();
            }
            let holdings = self
                .state
                .read()
                .await
                .portfolios
                .get(client_id)
                .cloned()
                .unwrap_or_default();
            ApiResponse::ok(Portfolio::new(holdings), "")
        }
    }
}
