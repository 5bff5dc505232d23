//! Typed record access on top of [`KvStore`]
//!
//! Reads never fail on bad data: a document that does not decode is
//! reported with `warn!` and replaced by the type's default. Storage errors
//! (I/O, permissions) still propagate.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use roster_domain::{Result, RosterError};

use super::KvStore;
use crate::errors::InfraError;

// Record keys
pub const SLOTS_KEY: &str = "roster.slots";
pub const EXTRAS_KEY: &str = "roster.extras";
pub const CALENDAR_KEY: &str = "roster.calendar";
pub const AVAILABILITY_KEY: &str = "roster.availability";
pub const WINDOW_SETTINGS_KEY: &str = "roster.window_settings";
pub const SCHEMA_VERSION_KEY: &str = "roster.schema_version";

/// Raw document under `key`. A document the backend cannot decode counts as
/// absent.
pub fn load_value(store: &dyn KvStore, key: &str) -> Result<Option<Value>> {
    match store.get(key) {
        Ok(value) => Ok(value),
        Err(RosterError::Serialization(reason)) => {
            warn!(key, %reason, "Unreadable record replaced by default");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Decode the record under `key`, or `None` when absent or malformed.
pub fn load_record<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Result<Option<T>> {
    let Some(value) = load_value(store, key)? else { return Ok(None) };
    match serde_json::from_value(value) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            warn!(key, error = %e, "Malformed record replaced by default");
            Ok(None)
        }
    }
}

/// Decode a list record element by element, dropping elements that do not
/// decode. Returns the kept elements and how many were dropped.
pub fn load_list<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Result<(Vec<T>, usize)> {
    let Some(value) = load_value(store, key)? else { return Ok((Vec::new(), 0)) };
    let Value::Array(items) = value else {
        warn!(key, "Expected a list; record replaced by default");
        return Ok((Vec::new(), 0));
    };
    Ok(decode_elements(key, items))
}

/// Decode each element, keeping the ones that fit `T`.
pub fn decode_elements<T: DeserializeOwned>(key: &str, items: Vec<Value>) -> (Vec<T>, usize) {
    let total = items.len();
    let kept: Vec<T> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(key, error = %e, "Dropped malformed element");
                None
            }
        })
        .collect();
    let dropped = total - kept.len();
    (kept, dropped)
}

/// Serialize and store `record` under `key`.
pub fn save_record<T: Serialize + ?Sized>(
    store: &dyn KvStore,
    key: &str,
    record: &T,
) -> Result<()> {
    let value = serde_json::to_value(record).map_err(InfraError::from)?;
    store.put(key, &value)
}
