//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::chart::RendererKind;
use crate::locale::Locale;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Runtime settings for the HTTP layer
    pub fn to_runtime(&self) -> crate::api::ApiConfig {
        crate::api::ApiConfig {
            request_timeout_ms: self.request_timeout_secs * 1000,
            cors_origins: self.cors_origins.clone(),
            ..crate::api::ApiConfig::new(self.host.clone(), self.port)
        }
    }
}

/// Dashboard presentation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub locale: Locale,

    #[serde(default)]
    pub renderer: RendererKind,

    #[serde(default = "default_chart_height")]
    pub chart_height: u32,

    /// Optional CSV dataset; the built-in 2024 figures are used when unset
    #[serde(default)]
    pub dataset: Option<String>,
}

fn default_chart_height() -> u32 {
    500
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            renderer: RendererKind::default(),
            chart_height: default_chart_height(),
            dataset: None,
        }
    }
}

impl DashboardConfig {
    pub fn dataset_path(&self) -> Option<&Path> {
        self.dataset.as_deref().map(Path::new)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("chicken-sales").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Explicit path if given (errors propagate), otherwise the default lookup
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::load_default()),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(host) = lookup("CHICKEN_SALES_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("CHICKEN_SALES_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Dashboard overrides
        if let Some(locale) = lookup("CHICKEN_SALES_LOCALE") {
            match locale.parse() {
                Ok(l) => self.dashboard.locale = l,
                Err(e) => tracing::warn!("Ignoring CHICKEN_SALES_LOCALE: {}", e),
            }
        }
        if let Some(renderer) = lookup("CHICKEN_SALES_RENDERER") {
            match renderer.parse() {
                Ok(r) => self.dashboard.renderer = r,
                Err(e) => tracing::warn!("Ignoring CHICKEN_SALES_RENDERER: {}", e),
            }
        }
        if let Some(dataset) = lookup("CHICKEN_SALES_DATASET") {
            self.dashboard.dataset = Some(dataset);
        }

        // Logging overrides
        if let Some(level) = lookup("CHICKEN_SALES_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("CHICKEN_SALES_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Chicken Sales Dashboard Configuration
#
# Environment variables override these settings:
# - CHICKEN_SALES_API_HOST
# - CHICKEN_SALES_API_PORT
# - CHICKEN_SALES_LOCALE
# - CHICKEN_SALES_RENDERER
# - CHICKEN_SALES_DATASET
# - CHICKEN_SALES_LOG_LEVEL
# - CHICKEN_SALES_LOG_FORMAT

[api]
# Dashboard server host
host = "0.0.0.0"

# Dashboard server port
port = 8501

# Allowed CORS origins (empty = allow any)
cors_origins = []

# Request timeout in seconds
request_timeout_secs = 30

[dashboard]
# Display language: ko or en
locale = "ko"

# Chart backend: svg (inline, no JavaScript) or plotly (plotly.js in the browser)
renderer = "svg"

# Chart height in pixels
chart_height = 500

# Optional CSV file with a month,units_sold header
# dataset = "./sales.csv"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.api.port, 8501);
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.dashboard.locale, Locale::Ko);
        assert_eq!(config.dashboard.renderer, RendererKind::Svg);
        assert_eq!(config.dashboard.chart_height, 500);
        assert!(config.dashboard.dataset_path().is_none());
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();

        assert_eq!(config.api.port, 8501);
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.dashboard.renderer, RendererKind::Svg);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse(
            r#"
[dashboard]
locale = "en"
renderer = "plotly"
"#,
        )
        .unwrap();

        assert_eq!(config.dashboard.locale, Locale::En);
        assert_eq!(config.dashboard.renderer, RendererKind::Plotly);
        assert_eq!(config.dashboard.chart_height, 500);
        assert_eq!(config.api.port, 8501);
    }

    #[test]
    fn test_invalid_renderer_is_parse_error() {
        assert!(Config::parse("[dashboard]\nrenderer = \"canvas\"\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nport = 9000\n[logging]\nformat = \"json\"").unwrap();
        file.flush().unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.port, 9000);
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/no/such/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("CHICKEN_SALES_API_PORT", "9100"),
            ("CHICKEN_SALES_LOCALE", "en"),
            ("CHICKEN_SALES_RENDERER", "bogus"),
            ("CHICKEN_SALES_DATASET", "/tmp/sales.csv"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.port, 9100);
        assert_eq!(config.dashboard.locale, Locale::En);
        // invalid value leaves the default in place
        assert_eq!(config.dashboard.renderer, RendererKind::Svg);
        assert_eq!(
            config.dashboard.dataset_path(),
            Some(Path::new("/tmp/sales.csv"))
        );
    }

    #[test]
    fn test_runtime_api_config() {
        let runtime = ApiConfig::default().to_runtime();
        assert_eq!(runtime.request_timeout_ms, 30_000);
        assert_eq!(runtime.addr(), "0.0.0.0:8501");

        let custom = ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
            cors_origins: vec!["http://localhost:3000".to_string()],
            request_timeout_secs: 5,
        }
        .to_runtime();
        assert_eq!(custom.addr(), "127.0.0.1:9000");
        assert_eq!(custom.request_timeout_ms, 5_000);
        assert_eq!(custom.cors_origins, vec!["http://localhost:3000"]);
    }
}
