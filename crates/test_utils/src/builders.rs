//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::{DateTime, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;

use core_kernel::{ClientId, OrderNumber, SchemeCode, TransactionId};
use domain_client::{Client, KycStatus};
use domain_fund::{Holding, RiskLevel, Scheme, Transaction, TransactionStatus, TransactionType};
use domain_transaction::MockBrokeragePort;

use crate::fixtures::{ClientFixtures, SchemeFixtures, TransactionFixtures};

/// Builder for client records
pub struct ClientBuilder {
    client: Client,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Starts from the verified fixture client
    pub fn new() -> Self {
        Self {
            client: ClientFixtures::verified(),
        }
    }

    /// Starts from a client with a random name and email
    pub fn random() -> Self {
        let mut builder = Self::new();
        builder.client.name = Name().fake();
        builder.client.email = SafeEmail().fake();
        builder
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.client.id = ClientId::new(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.client.name = name.into();
        self
    }

    pub fn with_pan(mut self, pan: impl Into<String>) -> Self {
        self.client.pan_card = pan.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.client.email = email.into();
        self
    }

    pub fn with_kyc(mut self, status: KycStatus) -> Self {
        self.client.kyc_status = status;
        self
    }

    pub fn build(self) -> Client {
        self.client
    }
}

/// Builder for schemes
pub struct SchemeBuilder {
    scheme: Scheme,
}

impl Default for SchemeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemeBuilder {
    /// Starts from AXIS001 (min 500, max 100000, NAV 25)
    pub fn new() -> Self {
        Self {
            scheme: SchemeFixtures::axis_bluechip(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.scheme.scheme_code = SchemeCode::new(code);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.scheme.scheme_name = name.into();
        self
    }

    pub fn with_nav(mut self, nav: Decimal) -> Self {
        self.scheme.nav = nav;
        self
    }

    pub fn with_bounds(mut self, min: Decimal, max: Decimal) -> Self {
        self.scheme.min_amount = min;
        self.scheme.max_amount = max;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.scheme.category = category.into();
        self
    }

    pub fn with_risk(mut self, risk: RiskLevel) -> Self {
        self.scheme.risk_level = risk;
        self
    }

    pub fn build(self) -> Scheme {
        self.scheme
    }
}

/// Builder for transaction records
pub struct TransactionBuilder {
    transaction: Transaction,
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self {
            transaction: TransactionFixtures::pending_purchase(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.transaction.id = TransactionId::new(id);
        self
    }

    pub fn with_client(mut self, id: impl Into<String>) -> Self {
        self.transaction.client_id = ClientId::new(id);
        self
    }

    pub fn with_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction.transaction_type = transaction_type;
        self
    }

    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.transaction.status = status;
        self
    }

    pub fn with_scheme(mut self, code: impl Into<String>) -> Self {
        self.transaction.scheme_code = SchemeCode::new(code);
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.transaction.amount = Some(amount);
        self.transaction.units = None;
        self
    }

    pub fn with_units(mut self, units: Decimal) -> Self {
        self.transaction.units = Some(units);
        self.transaction.amount = None;
        self
    }

    pub fn with_order_number(mut self, number: Option<&str>) -> Self {
        self.transaction.order_number = number.map(OrderNumber::new);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.transaction.timestamp = timestamp;
        self
    }

    pub fn build(self) -> Transaction {
        self.transaction
    }
}

/// Builder for a primed mock brokerage
#[derive(Default)]
pub struct MockPortBuilder {
    clients: Vec<Client>,
    schemes: Vec<Scheme>,
    holdings: Vec<(ClientId, Holding)>,
    history: Vec<(ClientId, Vec<Transaction>)>,
    offline: bool,
    rejection: Option<(String, Option<String>)>,
}

impl MockPortBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clients(mut self, clients: Vec<Client>) -> Self {
        self.clients = clients;
        self
    }

    pub fn with_schemes(mut self, schemes: Vec<Scheme>) -> Self {
        self.schemes = schemes;
        self
    }

    pub fn with_holding(mut self, client_id: ClientId, holding: Holding) -> Self {
        self.holdings.push((client_id, holding));
        self
    }

    pub fn with_history(mut self, client_id: ClientId, transactions: Vec<Transaction>) -> Self {
        self.history.push((client_id, transactions));
        self
    }

    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    pub fn rejecting(mut self, message: impl Into<String>, error_code: Option<&str>) -> Self {
        self.rejection = Some((message.into(), error_code.map(str::to_string)));
        self
    }

    pub async fn build(self) -> MockBrokeragePort {
        let mut port = MockBrokeragePort::new()
            .with_clients(self.clients)
            .await
            .with_schemes(self.schemes)
            .await;
        for (client_id, holding) in self.holdings {
            port = port.with_holding(client_id, holding).await;
        }
        for (client_id, transactions) in self.history {
            port = port.with_history(client_id, transactions).await;
        }
        if self.offline {
            port.set_offline(true).await;
        }
        if let Some((message, code)) = self.rejection {
            port.reject_orders(message, code.as_deref()).await;
        }
        port
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::ApiResponse;
    use domain_transaction::BrokeragePort;

    #[test]
    fn test_random_client_keeps_identity() {
        let client = ClientBuilder::random().with_id("CL042").build();
        assert_eq!(client.id.as_str(), "CL042");
        assert!(!client.name.is_empty());
        assert!(client.email.contains('@'));
    }

    #[tokio::test]
    async fn test_offline_port_builder() {
        let port = MockPortBuilder::new()
            .with_clients(vec![ClientBuilder::new().build()])
            .offline()
            .build()
            .await;
        let envelope: ApiResponse<Vec<Client>> = port.list_clients().await;
        assert!(envelope.is_network_error());
    }
}
