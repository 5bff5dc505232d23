//! Roster constants
//!
//! Centralized location for the domain-level constants used by the engine
//! and its storage adapters.

// Schema versions
pub const CURRENT_SCHEMA_VERSION: u32 = 3;
/// Stored versions below this get their slot list replaced by the defaults.
pub const SLOT_RESEED_SCHEMA_VERSION: u32 = 2;

// Event identity
pub const FIXED_KEY_TAG: &str = "F";
pub const EXTRA_KEY_TAG: &str = "X";
pub const KEY_SEPARATOR: char = '|';

// Permanently excluded extra event
pub const BANNED_EXTRA_TIME: &str = "00:00";
pub const BANNED_EXTRA_NAME: &str = "SAGRADO CORAÇÃO DE JESUS";

/// Fixed times withdrawn from the parish schedule; purged by the v3 migration.
pub const RETIRED_FIXED_TIMES: [&str; 2] = ["18:30", "23:30"];

// Staffing defaults
pub const DEFAULT_MIN_STAFF: u32 = 4;
pub const DEFAULT_MAX_STAFF: u32 = 12;
pub const DEFAULT_EXTRA_MAX_STAFF: u32 = 11;

// Edit window defaults
pub const DEFAULT_AUTO_DAYS_BEFORE_END: i64 = 10;
