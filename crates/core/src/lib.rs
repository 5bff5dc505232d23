//! # Roster Core
//!
//! Pure engine layer - no storage or platform code.
//!
//! This crate contains:
//! - Port interfaces (traits) for every persisted record and the clock
//! - Month calendar consolidation and availability garbage collection
//! - Staged availability editing, weekly recurrence and the edit window
//! - Shortage reports, registries and schema migration
//!
//! ## Architecture Principles
//! - Only depends on `roster-domain`
//! - Synchronous; no engine operation blocks on anything but its ports
//! - Algorithmic failures do not exist: every `Err` comes from a port

pub mod availability;
pub mod calendar;
pub mod migration;
pub mod registry;
pub mod reports;
pub mod staging;
pub mod window;

// Re-export specific items to avoid ambiguity
pub use availability::{AvailabilityRepository, AvailabilityStore};
pub use calendar::{
    assemble_month, CalendarBuilder, CalendarRepository, ExtraEventRepository, SlotRepository,
};
pub use migration::{MigrationReport, MigrationStores, SchemaMigrator, SchemaRepository};
pub use registry::{ExtraEventEditor, NewExtra, SlotRegistry, SlotUpdate};
pub use reports::ReportService;
pub use staging::Staged;
pub use window::{
    Clock, EditGate, FixedClock, WindowSettingsRepository, WindowSettingsService,
};
