//! Error types used throughout the roster engine

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the roster engine
///
/// The engine itself never fails for algorithmic reasons; every variant here
/// originates from a storage adapter, a decoding boundary, or configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum RosterError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for roster operations
pub type Result<T> = std::result::Result<T, RosterError>;
