//! Port interface for availability persistence

use roster_domain::{AvailabilityBook, Result};

/// Every user's availability records
pub trait AvailabilityRepository: Send + Sync {
    /// Load the full book; empty when nothing is stored
    fn load_availability(&self) -> Result<AvailabilityBook>;

    /// Replace the full book
    fn save_availability(&self, book: &AvailabilityBook) -> Result<()>;
}
