//! Application configuration structures.

use daodash_core::TracingConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Persistence backend configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Query cache configuration.
    #[serde(default)]
    pub query: QueryConfig,

    /// IPFS gateway configuration for avatar resolution.
    #[serde(default)]
    pub ipfs: IpfsConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "daodash".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Which persistence backend holds the favorites collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local, lost on exit.
    Memory,
    /// SQLite database file.
    #[default]
    Sqlite,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Persistence backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend kind.
    pub backend: StorageBackend,
    /// Database URL (sqlite backend only).
    pub url: String,
    /// Maximum connection pool size.
    pub max_connections: u32,
    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            url: "sqlite://daodash.db?mode=rwc".to_string(),
            max_connections: 5,
            connect_timeout_secs: 30,
        }
    }
}

impl StorageConfig {
    /// An in-memory SQLite database, used by tests.
    #[must_use]
    pub fn sqlite_in_memory() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            connect_timeout_secs: 5,
        }
    }

    /// Returns the connect timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Whether the URL points at a per-connection in-memory database.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Query cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Page size of the infinite favorites listing.
    pub infinite_page_size: usize,
    /// Age after which cached results are refetched on next observation.
    /// `None` keeps results until they are invalidated; `0` refetches on
    /// every observation.
    pub stale_time_secs: Option<u64>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            infinite_page_size: 4,
            stale_time_secs: None,
        }
    }
}

impl QueryConfig {
    /// Returns the stale time as a Duration.
    #[must_use]
    pub fn stale_time(&self) -> Option<Duration> {
        self.stale_time_secs.map(Duration::from_secs)
    }
}

/// IPFS gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IpfsConfig {
    /// Gateway used for mainnets and unsupported chains.
    pub gateway: String,
    /// Gateway used for test networks.
    pub testnet_gateway: String,
}

impl Default for IpfsConfig {
    fn default() -> Self {
        Self {
            gateway: "https://ipfs.io".to_string(),
            testnet_gateway: "https://ipfs.io".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Emit JSON log lines.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl ObservabilityConfig {
    /// Converts into the tracing subscriber configuration.
    #[must_use]
    pub fn tracing(&self) -> TracingConfig {
        TracingConfig::from_level(&self.log_level.to_lowercase(), self.json_logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.app.name, "daodash");
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.query.infinite_page_size, 4);
        assert!(config.query.stale_time().is_none());
    }

    #[test]
    fn test_shipped_default_toml_is_valid() {
        let config: AppConfig =
            toml::from_str(include_str!("../../../config/default.toml")).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.query.infinite_page_size, 4);
        assert!(config.query.stale_time_secs.is_none());
        assert!(crate::ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_in_memory_detection() {
        assert!(StorageConfig::sqlite_in_memory().is_in_memory());
        assert!(!StorageConfig::default().is_in_memory());
    }

    #[test]
    fn test_stale_time() {
        let config = QueryConfig {
            infinite_page_size: 4,
            stale_time_secs: Some(30),
        };
        assert_eq!(config.stale_time(), Some(Duration::from_secs(30)));

        let always = QueryConfig {
            infinite_page_size: 4,
            stale_time_secs: Some(0),
        };
        assert_eq!(always.stale_time(), Some(Duration::ZERO));
    }

    #[test]
    fn test_backend_deserialize() {
        let backend: StorageBackend = serde_json::from_str("\"memory\"").unwrap();
        assert_eq!(backend, StorageBackend::Memory);
        assert_eq!(backend.to_string(), "memory");
    }

    #[test]
    fn test_observability_to_tracing() {
        let config = ObservabilityConfig {
            log_level: "DEBUG".to_string(),
            json_logs: true,
        };
        let tracing = config.tracing();
        assert_eq!(tracing.filter, "debug,daodash=debug");
        assert!(tracing.json);
    }
}
