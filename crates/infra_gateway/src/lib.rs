//! Infrastructure - HTTP gateway to the BSE order-routing API
//!
//! Implements `domain_transaction::BrokeragePort` over `reqwest`. The gateway
//! is constructed explicitly and passed to whoever needs it; its bearer
//! token is set once through `set_auth_token`.

pub mod config;
pub mod error;
pub mod gateway;

pub use config::{GatewayConfig, DEFAULT_BASE_URL};
pub use error::GatewayError;
pub use gateway::BseGateway;
