//! # Roster Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Key-value storage backends (in-memory, JSON files on disk)
//! - Repository adapters with load-boundary repair
//! - Configuration loading and tracing setup
//! - The system clock and the bootstrap context
//!
//! ## Architecture
//! - Implements traits defined in `roster-core`
//! - Depends on `roster-domain` and `roster-core`
//! - Contains all "impure" code (I/O, wall clock, global subscriber)

pub mod bootstrap;
pub mod clock;
pub mod config;
pub mod errors;
pub mod observability;
pub mod repositories;
pub mod storage;

// Re-export commonly used items
pub use bootstrap::RosterContext;
pub use clock::SystemClock;
pub use errors::InfraError;
pub use observability::init_tracing;
pub use repositories::*;
pub use storage::{FileKvStore, KvStore, MemoryKvStore};
