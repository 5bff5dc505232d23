//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Searches multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `ROSTER_STORAGE_PATH`: Storage directory (required)
//! - `ROSTER_STORAGE_BACKEND`: `memory` or `file` (default `file`)
//! - `ROSTER_LOG_FILTER`: Default `EnvFilter` directive (default `info`)
//! - `ROSTER_LOG_JSON`: Emit JSON log lines (true/false)
//! - `ROSTER_SEED_DEFAULT_SLOTS`: Seed the default schedule into an empty
//!   slot registry (true/false)
//! - `ROSTER_AUTO_DAYS_BEFORE_END`: Auto window length used before any
//!   settings record exists
//!
//! ## File Locations
//! The loader searches the following paths (in order):
//! 1. `./roster.json` or `./roster.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names in the parent and grandparent directories
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use roster_domain::{
    Config, LoggingConfig, Result, RosterConfig, RosterError, StorageBackend, StorageConfig,
};

use crate::errors::InfraError;

const CONFIG_FILE_NAMES: [&str; 4] = ["roster.json", "roster.toml", "config.json", "config.toml"];
const SEARCH_PREFIXES: [&str; 3] = ["", "..", "../.."];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variable is missing or a value is invalid, falls back to loading from a
/// config file.
///
/// # Errors
/// Returns `RosterError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `ROSTER_STORAGE_PATH` must be present; every other variable falls back to
/// the `Config` default.
///
/// # Errors
/// Returns `RosterError::Config` if the storage path is missing or a value
/// cannot be parsed.
pub fn load_from_env() -> Result<Config> {
    let defaults = Config::default();

    let path = env_var("ROSTER_STORAGE_PATH")?;
    let backend = match std::env::var("ROSTER_STORAGE_BACKEND") {
        Ok(raw) => raw.parse::<StorageBackend>().map_err(RosterError::Config)?,
        Err(_) => defaults.storage.backend,
    };

    let filter = std::env::var("ROSTER_LOG_FILTER").unwrap_or(defaults.logging.filter);
    let json = env_bool("ROSTER_LOG_JSON", defaults.logging.json);

    let seed_default_slots =
        env_bool("ROSTER_SEED_DEFAULT_SLOTS", defaults.roster.seed_default_slots);
    let default_auto_days_before_end = match std::env::var("ROSTER_AUTO_DAYS_BEFORE_END") {
        Ok(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|e| RosterError::Config(format!("Invalid auto days before end: {}", e)))?,
        Err(_) => defaults.roster.default_auto_days_before_end,
    };

    Ok(Config {
        storage: StorageConfig { backend, path },
        logging: LoggingConfig { filter, json },
        roster: RosterConfig { seed_default_slots, default_auto_days_before_end },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, searches multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `RosterError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(RosterError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => search_config_paths().ok_or_else(|| {
            RosterError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| RosterError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`). Sections and
/// fields left out take their defaults.
///
/// # Errors
/// Returns `RosterError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => Ok(toml::from_str(contents).map_err(InfraError::from)?),
        "json" => serde_json::from_str(contents)
            .map_err(|e| RosterError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(RosterError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Search multiple paths for configuration files
///
/// Searches the working directory, its two parents, then the same three
/// levels relative to the executable. Within each directory `roster.*` wins
/// over `config.*`.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn search_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| {
            SEARCH_PREFIXES.iter().flat_map(move |prefix| {
                CONFIG_FILE_NAMES.iter().map(move |name| root.join(prefix).join(name))
            })
        })
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `RosterError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| RosterError::Config(format!("Missing required environment variable: {}", key)))
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
