//! BSE order-routing gateway
//!
//! # Endpoints
//!
//! | Operation          | Method | Path                               |
//! |--------------------|--------|------------------------------------|
//! | list clients       | GET    | `/clients`                         |
//! | get client         | GET    | `/clients/{id}`                    |
//! | list schemes       | GET    | `/schemes`                         |
//! | get scheme         | GET    | `/schemes/{code}`                  |
//! | purchase           | POST   | `/transactions/purchase`           |
//! | redeem             | POST   | `/transactions/redeem`             |
//! | switch             | POST   | `/transactions/switch`             |
//! | history            | GET    | `/transactions/history/{clientId}` |
//! | status             | GET    | `/transactions/status/{id}`        |
//! | portfolio          | GET    | `/portfolio/{clientId}`            |
//!
//! Every request carries `Authorization: Bearer <token>` and
//! `Content-Type: application/json`. The body is decoded as an envelope
//! whatever the HTTP status, so a remote rejection reaches the user
//! verbatim. Transport and decoding failures become the network-error
//! envelope. There is no retry and no timeout.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use core_kernel::{
    AdapterHealth, ApiResponse, ClientId, DomainPort, HealthCheckResult, HealthCheckable,
    OperationMetadata, PortError, SchemeCode, TransactionId,
};
use domain_client::Client;
use domain_fund::{Portfolio, PurchaseRequest, RedeemRequest, Scheme, SwitchRequest, Transaction};
use domain_transaction::BrokeragePort;

use crate::config::GatewayConfig;
use crate::error::GatewayError;

const CORRELATION_HEADER: &str = "X-Correlation-ID";

/// HTTP implementation of [`BrokeragePort`]
#[derive(Debug)]
pub struct BseGateway {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<String>,
}

impl BseGateway {
    /// Creates a gateway; no request is made until a port method is called
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| GatewayError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidBaseUrl {
                url: config.base_url,
                reason: "URL cannot carry a path".to_string(),
            });
        }
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url,
            token: RwLock::new(String::new()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, escaping each one
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResponse<T> {
        self.call(Method::GET, segments, None::<&()>).await
    }

    async fn post<B, T>(&self, segments: &[&str], body: &B) -> ApiResponse<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        self.call(Method::POST, segments, Some(body)).await
    }

    async fn call<B, T>(&self, method: Method, segments: &[&str], body: Option<&B>) -> ApiResponse<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        let metadata = OperationMetadata::generate();
        let correlation_id = metadata.correlation_id.unwrap_or_default();
        let token = self.token.read().await.clone();

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json")
            .header(CORRELATION_HEADER, correlation_id.as_str());
        if let Some(body) = body {
            request = request.json(body);
        }

        let started = Instant::now();
        match Self::execute(request).await {
            Ok(envelope) => {
                debug!(
                    %method,
                    path = url.path(),
                    %correlation_id,
                    success = envelope.success,
                    error_code = envelope.error_code.as_deref().unwrap_or(""),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Brokerage call finished"
                );
                envelope
            }
            Err(error) => {
                warn!(
                    %method,
                    path = url.path(),
                    %correlation_id,
                    transient = error.is_transient(),
                    %error,
                    "Brokerage call failed"
                );
                error.into_envelope()
            }
        }
    }

    async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<ApiResponse<T>, PortError> {
        let response = request
            .send()
            .await
            .map_err(|e| PortError::connection_from("request could not be sent", e))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| PortError::connection_from("response body could not be read", e))?;
        serde_json::from_slice(&body)
            .map_err(|e| PortError::transformation(format!("HTTP {} with undecodable body: {}", status, e)))
    }
}

impl DomainPort for BseGateway {}

#[async_trait]
impl HealthCheckable for BseGateway {
    /// Lists schemes and reports how the brokerage answered
    async fn health_check(&self) -> HealthCheckResult {
        let started = Instant::now();
        let envelope: ApiResponse<serde_json::Value> = self.get(&["schemes"]).await;
        let (status, message) = if envelope.success {
            (AdapterHealth::Healthy, None)
        } else if envelope.is_network_error() {
            (AdapterHealth::Unhealthy, Some(envelope.message))
        } else {
            (AdapterHealth::Degraded, Some(envelope.message))
        };
        HealthCheckResult {
            adapter_id: "bse-gateway".to_string(),
            status,
            latency_ms: started.elapsed().as_millis() as u64,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl BrokeragePort for BseGateway {
    async fn set_auth_token(&self, token: String) {
        *self.token.write().await = token;
    }

    async fn list_clients(&self) -> ApiResponse<Vec<Client>> {
        self.get(&["clients"]).await
    }

    async fn get_client(&self, id: &ClientId) -> ApiResponse<Client> {
        self.get(&["clients", id.as_str()]).await
    }

    async fn list_schemes(&self) -> ApiResponse<Vec<Scheme>> {
        self.get(&["schemes"]).await
    }

    async fn get_scheme(&self, code: &SchemeCode) -> ApiResponse<Scheme> {
        self.get(&["schemes", code.as_str()]).await
    }

    async fn purchase(&self, request: &PurchaseRequest) -> ApiResponse<Transaction> {
        self.post(&["transactions", "purchase"], request).await
    }

    async fn redeem(&self, request: &RedeemRequest) -> ApiResponse<Transaction> {
        self.post(&["transactions", "redeem"], request).await
    }

    async fn switch(&self, request: &SwitchRequest) -> ApiResponse<Transaction> {
        self.post(&["transactions", "switch"], request).await
    }

    async fn transaction_history(&self, client_id: &ClientId) -> ApiResponse<Vec<Transaction>> {
        self.get(&["transactions", "history", client_id.as_str()]).await
    }

    async fn transaction_status(&self, id: &TransactionId) -> ApiResponse<Transaction> {
        self.get(&["transactions", "status", id.as_str()]).await
    }

    async fn portfolio(&self, client_id: &ClientId) -> ApiResponse<Portfolio> {
        self.get(&["portfolio", client_id.as_str()]).await
    }
}
