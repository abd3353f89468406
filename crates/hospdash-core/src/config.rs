//! Configuration management for hospdash

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// API behavior configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Demo dataset configuration
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Reporting client configuration
    #[serde(default)]
    pub client: ClientConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// API behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Enable CORS
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,

    /// CORS allowed origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Request timeout in seconds applied by the HTTP layer
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

/// Demo dataset configuration
///
/// The reporting endpoints serve a deterministic in-memory dataset; the same
/// seed always produces the same figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Seed for the dataset generator
    #[serde(default = "default_dataset_seed")]
    pub seed: u64,

    /// First day covered by the dataset
    #[serde(default = "default_dataset_start")]
    pub start: NaiveDate,

    /// Last day covered by the dataset
    #[serde(default = "default_dataset_end")]
    pub end: NaiveDate,

    /// Number of doctors generated per department
    #[serde(default = "default_doctors_per_department")]
    pub doctors_per_department: usize,
}

/// Reporting client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the reporting API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_client_timeout")]
    pub request_timeout: u64,

    /// Rows per detail-table page
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Log to file
    #[serde(default)]
    pub file: Option<PathBuf>,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8080
}

const fn default_enable_cors() -> bool {
    true
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

const fn default_request_timeout() -> u64 {
    30
}

const fn default_dataset_seed() -> u64 {
    20_240_101
}

fn default_dataset_start() -> NaiveDate {
    // Two full years of history so year-over-year baselines exist
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn default_dataset_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap_or(NaiveDate::MAX)
}

const fn default_doctors_per_department() -> usize {
    4
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

const fn default_client_timeout() -> u64 {
    10
}

const fn default_per_page() -> u32 {
    20
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enable_cors: default_enable_cors(),
            cors_origins: default_cors_origins(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            seed: default_dataset_seed(),
            start: default_dataset_start(),
            end: default_dataset_end(),
            doctors_per_department: default_doctors_per_department(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout: default_client_timeout(),
            per_page: default_per_page(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            api: ApiConfig::default(),
            dataset: DatasetConfig::default(),
            client: ClientConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment and files
    ///
    /// Reads an optional `config.toml` from the working directory, then
    /// overlays `HOSPDASH_`-prefixed environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> crate::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("HOSPDASH").separator("_"))
            .build()
            .map_err(|e| crate::Error::Configuration {
                message: e.to_string(),
            })?;

        config
            .try_deserialize()
            .map_err(|e| crate::Error::Configuration {
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();

        assert!(!config.server.host.is_empty());
        assert!(config.server.port > 0);

        assert!(config.api.request_timeout > 0);
        assert!(!config.api.cors_origins.is_empty());

        assert!(config.dataset.start < config.dataset.end);
        assert!(config.dataset.doctors_per_department > 0);

        assert!(!config.client.base_url.is_empty());
        assert!(config.client.request_timeout > 0);
        assert!(config.client.per_page > 0);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_dataset_spans_more_than_a_year() {
        // Year-over-year baselines need at least 12 months of history
        let config = DatasetConfig::default();
        let days = (config.end - config.start).num_days();
        assert!(days > 366, "dataset span too short: {days} days");
    }

    #[test]
    fn test_partial_file_fills_missing_sections() {
        let toml = r#"
            [server]
            port = 9999

            [dataset]
            seed = 7
        "#;

        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 9999);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.dataset.seed, 7);
        assert_eq!(config.client.per_page, 20);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized.server.port, config.server.port);
        assert_eq!(deserialized.dataset.seed, config.dataset.seed);
        assert_eq!(deserialized.client.base_url, config.client.base_url);
    }
}
