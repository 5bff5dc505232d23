//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_AUTO_DAYS_BEFORE_END;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub roster: RosterConfig,
}

/// Where persisted roster records live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local map; nothing survives a restart
    Memory,
    /// One JSON document per record inside `StorageConfig::path`
    #[default]
    File,
}

crate::impl_keyword_conversions!(StorageBackend {
    Memory => "memory",
    File => "file",
});

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { backend: StorageBackend::File, path: "roster-data".to_string() }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub filter: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: "info".to_string(), json: false }
    }
}

/// Engine defaults applied when the store holds no record yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Seed the default parish schedule when the slot registry is empty
    pub seed_default_slots: bool,
    pub default_auto_days_before_end: i64,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            seed_default_slots: true,
            default_auto_days_before_end: DEFAULT_AUTO_DAYS_BEFORE_END,
        }
    }
}
