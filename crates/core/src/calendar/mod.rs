//! Calendar consolidation: registries in, per-date event lists out

pub mod builder;
pub mod ports;

pub use builder::{assemble_month, key_is_valid, sweep_month, CalendarBuilder};
pub use ports::{CalendarRepository, ExtraEventRepository, SlotRepository};
