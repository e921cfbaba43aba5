//! Gateway configuration

/// Production endpoint of the order-routing API
pub const DEFAULT_BASE_URL: &str = "https://api.bsestarmf.in/v1";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
