//! Configuration validation module.
//!
//! Validates every configuration value up front, failing fast on invalid
//! configuration rather than at the first query.

use crate::{AppConfig, StorageBackend};
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Storage URL is missing for a backend that needs one.
    MissingStorageUrl,
    /// Storage URL has the wrong scheme.
    InvalidStorageUrl { value: String },
    /// Pool size must be at least one.
    InvalidPoolSize { value: u32 },
    /// Timeout value must be positive.
    NonPositiveTimeout { name: String },
    /// Infinite listing page size must be positive.
    InvalidPageSize { value: usize },
    /// Gateway URL is not an http(s) URL.
    InvalidGatewayUrl { name: String, value: String },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStorageUrl => write!(f, "Storage URL is required for the sqlite backend"),
            Self::InvalidStorageUrl { value } => {
                write!(f, "Invalid storage URL '{}': must start with sqlite:", value)
            }
            Self::InvalidPoolSize { value } => {
                write!(f, "Invalid pool size: {} (must be at least 1)", value)
            }
            Self::NonPositiveTimeout { name } => write!(f, "Timeout '{}' must be positive", name),
            Self::InvalidPageSize { value } => {
                write!(f, "Invalid infinite page size: {} (must be at least 1)", value)
            }
            Self::InvalidGatewayUrl { name, value } => {
                write!(f, "Invalid {} URL '{}': must be an http(s) URL", name, value)
            }
            Self::InvalidLogLevel { value } => write!(
                f,
                "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];

    /// Validates the entire application configuration.
    ///
    /// Returns every error found, not just the first.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_storage(config, &mut errors);
        Self::validate_query(config, &mut errors);
        Self::validate_ipfs(config, &mut errors);
        Self::validate_observability(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_storage(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let storage = &config.storage;
        if storage.backend != StorageBackend::Sqlite {
            return;
        }

        if storage.url.trim().is_empty() {
            errors.push(ConfigValidationError::MissingStorageUrl);
        } else if !storage.url.starts_with("sqlite:") {
            errors.push(ConfigValidationError::InvalidStorageUrl {
                value: storage.url.clone(),
            });
        }

        if storage.max_connections == 0 {
            errors.push(ConfigValidationError::InvalidPoolSize {
                value: storage.max_connections,
            });
        }

        if storage.connect_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "storage.connect_timeout_secs".to_string(),
            });
        }
    }

    fn validate_query(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.query.infinite_page_size == 0 {
            errors.push(ConfigValidationError::InvalidPageSize { value: 0 });
        }
    }

    fn validate_ipfs(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        for (name, value) in [
            ("ipfs.gateway", &config.ipfs.gateway),
            ("ipfs.testnet_gateway", &config.ipfs.testnet_gateway),
        ] {
            let valid = Url::parse(value)
                .map(|url| url.scheme() == "http" || url.scheme() == "https")
                .unwrap_or(false);
            if !valid {
                errors.push(ConfigValidationError::InvalidGatewayUrl {
                    name: name.to_string(),
                    value: value.clone(),
                });
            }
        }
    }

    fn validate_observability(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let level = config.observability.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.observability.log_level.clone(),
            });
        }
    }
}

/// Formats validation errors for display.
#[must_use]
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_memory_backend_ignores_url() {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config.storage.url = String::new();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_sqlite_requires_url() {
        let mut config = AppConfig::default();
        config.storage.url = "  ".to_string();
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors, vec![ConfigValidationError::MissingStorageUrl]);
    }

    #[test]
    fn test_sqlite_url_scheme() {
        let mut config = AppConfig::default();
        config.storage.url = "mysql://localhost/db".to_string();
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(errors[0], ConfigValidationError::InvalidStorageUrl { .. }));
    }

    #[test]
    fn test_zero_page_size() {
        let mut config = AppConfig::default();
        config.query.infinite_page_size = 0;
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors, vec![ConfigValidationError::InvalidPageSize { value: 0 }]);
    }

    #[test]
    fn test_gateway_must_be_http() {
        let mut config = AppConfig::default();
        config.ipfs.gateway = "ipfs://gateway".to_string();
        config.ipfs.testnet_gateway = "not a url".to_string();
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = AppConfig::default();
        config.observability.log_level = "verbose".to_string();
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(errors[0], ConfigValidationError::InvalidLogLevel { .. }));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.storage.max_connections = 0;
        config.storage.connect_timeout_secs = 0;
        config.query.infinite_page_size = 0;
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 3);

        let formatted = format_validation_errors(&errors);
        assert!(formatted.contains("1. Invalid pool size"));
        assert!(formatted.contains("2. Timeout 'storage.connect_timeout_secs'"));
        assert!(formatted.contains("3. Invalid infinite page size"));
    }

    #[test]
    fn test_zero_stale_time_is_valid() {
        let mut config = AppConfig::default();
        config.query.stale_time_secs = Some(0);
        assert!(ConfigValidator::validate(&config).is_ok());
    }
}
