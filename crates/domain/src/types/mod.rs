//! Roster data model

pub mod actor;
pub mod availability;
pub mod event;
pub mod extra;
pub mod key;
pub mod month;
pub mod report;
pub mod slot;
pub mod time;
pub mod window;

pub use actor::{Actor, Role};
pub use availability::{AvailabilityBook, DateFlags, MonthFlags, UserId};
pub use event::{event_key, CalendarEvent, EventKind, MonthCalendar};
pub use extra::{is_banned_extra, ExtraEvent, ExtraEventsByMonth};
pub use key::{is_legacy_key, migrate_legacy_key, EventKey};
pub use month::YearMonth;
pub use report::{EventRoster, SelectionTally, ShortageEntry};
pub use slot::{slot_id, TimeSlot};
pub use time::SlotTime;
pub use window::{EditWindowSettings, MonthOverride, WindowMode};
