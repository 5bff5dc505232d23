//! Edit window policy and settings

pub mod policy;
pub mod ports;
pub mod service;

pub use policy::{auto_window, can_edit, is_open, report_month, target_month, EditGate};
pub use ports::{Clock, FixedClock, WindowSettingsRepository};
pub use service::WindowSettingsService;
