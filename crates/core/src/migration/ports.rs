//! Port interface for the persisted schema version

use roster_domain::Result;

/// Version marker of the stored records
pub trait SchemaRepository: Send + Sync {
    /// Stored version, `0` when no version was ever written
    fn schema_version(&self) -> Result<u32>;

    fn set_schema_version(&self, version: u32) -> Result<()>;
}
