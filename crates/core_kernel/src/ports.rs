//! Ports and Adapters Infrastructure
//!
//! Foundational types for the ports and adapters layout used by the
//! transaction desk.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │         Workflow, forms, pickers, history view              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  BrokeragePort trait                         │
//! │         (domain_transaction, envelope in, envelope out)      │
//! └─────────────────────────────────────────────────────────────┘
//!                    ▲                         ▲
//!                    │                         │
//!         ┌─────────┴─────────┐     ┌────────┴────────┐
//!         │   Mock adapter    │     │  HTTP adapter    │
//!         │  (in-memory)      │     │  (infra_gateway) │
//!         └───────────────────┘     └──────────────────┘
//! ```
//!
//! Adapters classify their internal failures with `PortError` for logging,
//! then fold every failure into the network-error envelope before it
//! reaches a caller.

use std::fmt;
use thiserror::Error;
use serde::{Deserialize, Serialize};

use crate::envelope::ApiResponse;

/// Internal failure of an adapter call
#[derive(Debug, Error)]
pub enum PortError {
    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The response body could not be decoded
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },
}

impl PortError {
    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a Connection error keeping its cause
    pub fn connection_from(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        PortError::Connection {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a Transformation error
    pub fn transformation(message: impl fmt::Display) -> Self {
        PortError::Transformation {
            message: message.to_string(),
        }
    }

    /// Returns true if this error indicates a transient failure
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Connection { .. })
    }

    /// Folds the failure into the envelope callers branch on
    pub fn into_envelope<T>(self) -> ApiResponse<T> {
        ApiResponse::network_error()
    }
}

/// Marker trait for all domain ports
///
/// All port traits should extend this marker to ensure they are
/// thread-safe and can be used in async contexts.
pub trait DomainPort: Send + Sync + 'static {}

/// Health status for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    /// Adapter is healthy and operational
    Healthy,
    /// Adapter is degraded but operational
    Degraded,
    /// Adapter is unhealthy and not operational
    Unhealthy,
}

/// Health check result for an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Adapter identifier
    pub adapter_id: String,
    /// Current health status
    pub status: AdapterHealth,
    /// Latency of the health check in milliseconds
    pub latency_ms: u64,
    /// Optional message with additional details
    pub message: Option<String>,
    /// Timestamp of the health check
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

/// Trait for adapters that support health checks
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    /// Performs a health check on the adapter
    async fn health_check(&self) -> HealthCheckResult;
}

/// Metadata about a port operation for tracing
#[derive(Debug, Clone, Default)]
pub struct OperationMetadata {
    /// Correlation ID for tracing across systems
    pub correlation_id: Option<String>,
}

impl OperationMetadata {
    /// Creates new metadata with a correlation ID
    pub fn with_correlation_id(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: Some(correlation_id.into()),
        }
    }

    /// Creates metadata with a fresh time-ordered correlation ID
    pub fn generate() -> Self {
        Self::with_correlation_id(uuid::Uuid::now_v7().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_transient() {
        assert!(PortError::connection("refused").is_transient());
        assert!(!PortError::transformation("expected value at line 1").is_transient());
    }

    #[test]
    fn test_every_port_error_folds_to_network_error() {
        let errors = vec![
            PortError::connection("refused"),
            PortError::transformation("bad json"),
        ];
        for error in errors {
            let envelope: ApiResponse<()> = error.into_envelope();
            assert!(envelope.is_network_error());
        }
    }

    #[test]
    fn test_operation_metadata() {
        let metadata = OperationMetadata::with_correlation_id("req-123");
        assert_eq!(metadata.correlation_id, Some("req-123".to_string()));
    }

    #[test]
    fn test_generated_correlation_ids_differ() {
        let a = OperationMetadata::generate();
        let b = OperationMetadata::generate();
        assert_ne!(a.correlation_id, b.correlation_id);
    }
}
