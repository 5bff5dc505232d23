//! Port interfaces for the registries and the built calendar cache
//!
//! These traits define the boundaries between the calendar engine and
//! whatever storage the host application provides.

use roster_domain::{ExtraEventsByMonth, MonthCalendar, Result, TimeSlot, YearMonth};

/// Recurring weekly slots
pub trait SlotRepository: Send + Sync {
    /// Load the slot list in stored order; empty when nothing is stored
    fn load_slots(&self) -> Result<Vec<TimeSlot>>;

    /// Replace the slot list
    fn save_slots(&self, slots: &[TimeSlot]) -> Result<()>;
}

/// One-off extra events grouped by month
pub trait ExtraEventRepository: Send + Sync {
    /// Load every month's extras; empty when nothing is stored
    fn load_extras(&self) -> Result<ExtraEventsByMonth>;

    /// Replace the whole registry
    fn save_extras(&self, extras: &ExtraEventsByMonth) -> Result<()>;
}

/// Cache of built month calendars
pub trait CalendarRepository: Send + Sync {
    /// Load a previously built month
    fn load_month(&self, month: YearMonth) -> Result<Option<MonthCalendar>>;

    /// Store a built month, replacing any prior value in full
    fn save_month(&self, calendar: &MonthCalendar) -> Result<()>;

    /// Months currently cached
    fn cached_months(&self) -> Result<Vec<YearMonth>>;
}
