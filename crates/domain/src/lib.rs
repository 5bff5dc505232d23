//! # Roster Domain
//!
//! Data types and models for the volunteer roster engine.
//!
//! This crate contains:
//! - Registry records (`TimeSlot`, `ExtraEvent`) and the derived month calendar
//! - Event identity keys, including the legacy bare-time spelling
//! - Availability records and edit window settings
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other roster crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
