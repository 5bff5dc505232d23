//! Conversions from external infrastructure errors into domain errors.

use std::io::ErrorKind;

use roster_domain::RosterError;
use thiserror::Error;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct InfraError(pub RosterError);

impl From<InfraError> for RosterError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<RosterError> for InfraError {
    fn from(value: RosterError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoRosterError {
    fn into_roster(self) -> RosterError;
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → RosterError */
/* -------------------------------------------------------------------------- */

impl IntoRosterError for std::io::Error {
    fn into_roster(self) -> RosterError {
        match self.kind() {
            ErrorKind::NotFound => RosterError::NotFound(self.to_string()),
            ErrorKind::PermissionDenied => {
                RosterError::Storage(format!("permission denied: {self}"))
            }
            ErrorKind::InvalidData => RosterError::Serialization(self.to_string()),
            _ => RosterError::Storage(self.to_string()),
        }
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_roster())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → RosterError */
/* -------------------------------------------------------------------------- */

impl IntoRosterError for serde_json::Error {
    fn into_roster(self) -> RosterError {
        if self.is_io() {
            RosterError::Storage(self.to_string())
        } else {
            RosterError::Serialization(format!(
                "invalid JSON at line {} column {}: {self}",
                self.line(),
                self.column()
            ))
        }
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_roster())
    }
}

/* -------------------------------------------------------------------------- */
/* toml::de::Error → RosterError */
/* -------------------------------------------------------------------------- */

impl IntoRosterError for toml::de::Error {
    fn into_roster(self) -> RosterError {
        RosterError::Config(format!("Invalid TOML format: {}", self.message()))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        InfraError(value.into_roster())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
