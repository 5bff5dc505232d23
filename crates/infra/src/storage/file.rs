//! JSON-file key-value backend
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a sibling temporary file
//! first and are renamed into place, so a crash mid-write leaves the previous
//! document intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use roster_domain::{Result, RosterError};
use serde_json::Value;
use tracing::{debug, instrument};

use super::KvStore;
use crate::errors::InfraError;

/// Directory of JSON documents.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    /// Open (creating if needed) the directory at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(InfraError::from)?;
        debug!(dir = %dir.display(), "Opened file store");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
            && !key.starts_with('.');
        if !valid {
            return Err(RosterError::InvalidInput(format!("invalid storage key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KvStore for FileKvStore {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key)?;
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(InfraError::from(e).into()),
        };
        let value = serde_json::from_str(&contents).map_err(InfraError::from)?;
        Ok(Some(value))
    }

    #[instrument(skip(self, value), fields(dir = %self.dir.display()))]
    fn put(&self, key: &str, value: &Value) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        let contents = serde_json::to_vec_pretty(value).map_err(InfraError::from)?;
        fs::write(&tmp, contents).map_err(InfraError::from)?;
        fs::rename(&tmp, &path).map_err(InfraError::from)?;
        debug!(key, "Wrote record");
        Ok(())
    }

    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(InfraError::from(e).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_roundtrip_through_directory() {
        let dir = TempDir::new().unwrap();
        let store = FileKvStore::open(dir.path().join("nested")).unwrap();

        store.put("roster.schema_version", &json!(3)).unwrap();
        assert!(store.dir().join("roster.schema_version.json").exists());
        assert_eq!(store.get("roster.schema_version").unwrap(), Some(json!(3)));

        store.remove("roster.schema_version").unwrap();
        store.remove("roster.schema_version").unwrap();
        assert!(store.get("roster.schema_version").unwrap().is_none());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileKvStore::open(dir.path()).unwrap();

        assert!(matches!(store.get("../escape"), Err(RosterError::InvalidInput(_))));
        assert!(matches!(store.put("", &json!(1)), Err(RosterError::InvalidInput(_))));
    }

    #[test]
    fn test_corrupt_document_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let store = FileKvStore::open(dir.path()).unwrap();
        std::fs::write(dir.path().join("roster.slots.json"), "{ not json").unwrap();

        assert!(matches!(store.get("roster.slots"), Err(RosterError::Serialization(_))));
    }
}
