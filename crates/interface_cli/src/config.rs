//! CLI configuration

use serde::Deserialize;

use domain_transaction::BrokeragePort;
use infra_gateway::{BseGateway, GatewayConfig, DEFAULT_BASE_URL};

use crate::error::CliError;

/// Environment prefix, e.g. `MF_API_BASE_URL`
pub const ENV_PREFIX: &str = "MF";

/// Desk configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Base URL of the order-routing API
    pub api_base_url: String,
    /// Bearer token; empty when unauthenticated
    pub api_token: String,
    /// Log level
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            api_token: String::new(),
            log_level: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from `MF_*` environment variables over defaults
    pub fn from_env() -> Result<Self, CliError> {
        Ok(Self::from_source(config::Environment::with_prefix(ENV_PREFIX))?)
    }

    fn from_source(environment: config::Environment) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("api_base_url", defaults.api_base_url)?
            .set_default("api_token", defaults.api_token)?
            .set_default("log_level", defaults.log_level)?
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    /// Applies command-line overrides
    pub fn with_overrides(mut self, base_url: Option<String>, token: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.api_base_url = base_url;
        }
        if let Some(token) = token {
            self.api_token = token;
        }
        self
    }

    pub fn gateway(&self) -> GatewayConfig {
        GatewayConfig::new(self.api_base_url.clone())
    }

    /// Builds the gateway and hands it the token, once
    pub async fn connect(&self) -> Result<BseGateway, CliError> {
        let gateway = BseGateway::new(self.gateway())?;
        gateway.set_auth_token(self.api_token.clone()).await;
        Ok(gateway)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_overrides_win() {
        let config = CliConfig::default().with_overrides(Some("http://localhost:9000/v1".into()), None);
        assert_eq!(config.api_base_url, "http://localhost:9000/v1");
        assert_eq!(config.api_token, "");
        assert_eq!(config.gateway().base_url, "http://localhost:9000/v1");
    }

    #[test]
    fn test_environment_over_defaults() {
        let vars = HashMap::from([
            ("MF_API_BASE_URL".to_string(), "http://127.0.0.1:8080/v1".to_string()),
            ("MF_LOG_LEVEL".to_string(), "debug".to_string()),
        ]);
        let config = CliConfig::from_source(
            config::Environment::with_prefix(ENV_PREFIX).source(Some(vars)),
        )
        .unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:8080/v1");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.api_token, "");
    }

    #[test]
    fn test_flags_over_environment() {
        let vars = HashMap::from([("MF_API_TOKEN".to_string(), "from-env".to_string())]);
        let config = CliConfig::from_source(
            config::Environment::with_prefix(ENV_PREFIX).source(Some(vars)),
        )
        .unwrap()
        .with_overrides(None, Some("from-flag".to_string()));
        assert_eq!(config.api_token, "from-flag");
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_connect_rejects_bad_base_url() {
        let config = CliConfig::default().with_overrides(Some("not a url".to_string()), None);
        let error = config.connect().await.unwrap_err();
        assert!(matches!(error, CliError::Gateway(_)));
        assert_eq!(error.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_connect_accepts_default() {
        let gateway = CliConfig::default().connect().await.unwrap();
        assert_eq!(gateway.base_url().as_str(), "https://api.bsestarmf.in/v1");
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.log_level, "info");
    }
}
