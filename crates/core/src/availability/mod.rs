//! Availability editing: staged store and weekly recurrence

pub mod ports;
mod recurrence;
pub mod store;

pub use ports::AvailabilityRepository;
pub use store::AvailabilityStore;
