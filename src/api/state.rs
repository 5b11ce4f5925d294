//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks. Nothing in
//! here is mutated after startup.

use std::sync::Arc;
use std::time::Instant;

use crate::dashboard::Dashboard;
use crate::sales::SalesSeries;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// The series every request renders
    pub series: Arc<SalesSeries>,
    /// Dashboard renderer (chart backend, theme, locale)
    pub dashboard: Arc<Dashboard>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(series: SalesSeries, dashboard: Dashboard, config: ApiConfig) -> Self {
        Self {
            series: Arc::new(series),
            dashboard: Arc::new(dashboard),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Allowed CORS origins; empty allows any
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8501,
            request_timeout_ms: 30_000,
            cors_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Config with custom host and port, defaults elsewhere
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_default_timeouts() {
        let config = ApiConfig::new("localhost", 3000);
        assert_eq!(config.addr(), "localhost:3000");
        assert_eq!(config.request_timeout_ms, 30_000);
        assert!(config.cors_origins.is_empty());
    }
}
