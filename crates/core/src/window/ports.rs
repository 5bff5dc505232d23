//! Port interfaces for edit window settings and the current date

use chrono::NaiveDate;
use roster_domain::{EditWindowSettings, Result};

/// The single window settings record
pub trait WindowSettingsRepository: Send + Sync {
    /// Load the record, `None` when it has never been saved
    fn load_settings(&self) -> Result<Option<EditWindowSettings>>;

    /// Replace the record
    fn save_settings(&self, settings: &EditWindowSettings) -> Result<()>;
}

/// Source of "today" for window decisions
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Clock pinned to one date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
