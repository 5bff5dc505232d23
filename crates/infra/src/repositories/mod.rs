//! Key-value implementations of the core repository ports
//!
//! Each repository validates and repairs its record at load: values that do
//! not fit the record shape are dropped or defaulted with a `warn!`, never
//! surfaced as errors.

pub mod availability_repository;
pub mod calendar_repository;
pub mod registry_repository;
pub mod settings_repository;

pub use availability_repository::KvAvailabilityRepository;
pub use calendar_repository::KvCalendarRepository;
pub use registry_repository::{KvExtraEventRepository, KvSlotRepository};
pub use settings_repository::{KvSchemaRepository, KvWindowSettingsRepository};
