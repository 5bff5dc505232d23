//! Key-value implementations of the window settings and schema version ports.

use std::sync::Arc;

use roster_core::{SchemaRepository, WindowSettingsRepository};
use roster_domain::{EditWindowSettings, Result, RosterError};
use serde_json::Value;
use tracing::{instrument, warn};

use crate::storage::records::{self, SCHEMA_VERSION_KEY, WINDOW_SETTINGS_KEY};
use crate::storage::KvStore;

/// Edit window settings stored as a single camelCase record.
pub struct KvWindowSettingsRepository {
    store: Arc<dyn KvStore>,
}

impl KvWindowSettingsRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }
}

impl WindowSettingsRepository for KvWindowSettingsRepository {
    #[instrument(skip(self))]
    fn load_settings(&self) -> Result<Option<EditWindowSettings>> {
        let Some(mut settings) =
            records::load_record::<EditWindowSettings>(self.store.as_ref(), WINDOW_SETTINGS_KEY)?
        else {
            return Ok(None);
        };
        let before = settings.clone();
        settings.sanitize();
        if settings != before {
            warn!("Repaired edit window settings on load");
        }
        Ok(Some(settings))
    }

    #[instrument(skip(self, settings), fields(mode = %settings.mode))]
    fn save_settings(&self, settings: &EditWindowSettings) -> Result<()> {
        records::save_record(self.store.as_ref(), WINDOW_SETTINGS_KEY, settings)
    }
}

/// Stored schema version; absent means version 0.
///
/// A record that is present but not a version number is an error rather
/// than version 0, so a damaged store is never reseeded over.
pub struct KvSchemaRepository {
    store: Arc<dyn KvStore>,
}

impl KvSchemaRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }
}

impl SchemaRepository for KvSchemaRepository {
    fn schema_version(&self) -> Result<u32> {
        let Some(value) = self.store.get(SCHEMA_VERSION_KEY)? else { return Ok(0) };
        parse_version(&value).ok_or_else(|| {
            warn!(%value, "Unreadable schema version; store left untouched");
            RosterError::Serialization(format!("unreadable schema version: {value}"))
        })
    }

    #[instrument(skip(self))]
    fn set_schema_version(&self, version: u32) -> Result<()> {
        records::save_record(self.store.as_ref(), SCHEMA_VERSION_KEY, &version)
    }
}

/// Version number, also accepted as a numeric string.
fn parse_version(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
