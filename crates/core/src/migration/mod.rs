//! Schema versioning of stored records

pub mod migrator;
pub mod ports;

pub use migrator::{MigrationReport, MigrationStores, SchemaMigrator};
pub use ports::SchemaRepository;
