//! Mock repository implementations for testing
//!
//! In-memory implementations of every core port. Each mock counts its
//! writes so tests can assert that no-op paths leave storage alone.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use roster_core::{
    AvailabilityRepository, CalendarRepository, ExtraEventRepository, SchemaRepository,
    SlotRepository, WindowSettingsRepository,
};
use roster_domain::{
    AvailabilityBook, EditWindowSettings, ExtraEventsByMonth, MonthCalendar, Result as DomainResult,
    TimeSlot, YearMonth,
};

/// In-memory mock for `SlotRepository`.
#[derive(Default)]
pub struct MockSlotRepository {
    slots: Mutex<Vec<TimeSlot>>,
    pub saves: AtomicUsize,
}

impl MockSlotRepository {
    pub fn new(slots: Vec<TimeSlot>) -> Self {
        Self { slots: Mutex::new(slots), saves: AtomicUsize::new(0) }
    }
}

impl SlotRepository for MockSlotRepository {
    fn load_slots(&self) -> DomainResult<Vec<TimeSlot>> {
        Ok(self.slots.lock().clone())
    }

    fn save_slots(&self, slots: &[TimeSlot]) -> DomainResult<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.slots.lock() = slots.to_vec();
        Ok(())
    }
}

/// In-memory mock for `ExtraEventRepository`.
#[derive(Default)]
pub struct MockExtraEventRepository {
    extras: Mutex<ExtraEventsByMonth>,
}

impl MockExtraEventRepository {
    pub fn new(extras: ExtraEventsByMonth) -> Self {
        Self { extras: Mutex::new(extras) }
    }
}

impl ExtraEventRepository for MockExtraEventRepository {
    fn load_extras(&self) -> DomainResult<ExtraEventsByMonth> {
        Ok(self.extras.lock().clone())
    }

    fn save_extras(&self, extras: &ExtraEventsByMonth) -> DomainResult<()> {
        *self.extras.lock() = extras.clone();
        Ok(())
    }
}

/// In-memory mock for `CalendarRepository`.
#[derive(Default)]
pub struct MockCalendarRepository {
    months: Mutex<BTreeMap<YearMonth, MonthCalendar>>,
}

impl MockCalendarRepository {
    pub fn insert(&self, calendar: MonthCalendar) {
        self.months.lock().insert(calendar.month(), calendar);
    }
}

impl CalendarRepository for MockCalendarRepository {
    fn load_month(&self, month: YearMonth) -> DomainResult<Option<MonthCalendar>> {
        Ok(self.months.lock().get(&month).cloned())
    }

    fn save_month(&self, calendar: &MonthCalendar) -> DomainResult<()> {
        self.months.lock().insert(calendar.month(), calendar.clone());
        Ok(())
    }

    fn cached_months(&self) -> DomainResult<Vec<YearMonth>> {
        Ok(self.months.lock().keys().copied().collect())
    }
}

/// In-memory mock for `AvailabilityRepository`.
#[derive(Default)]
pub struct MockAvailabilityRepository {
    book: Mutex<AvailabilityBook>,
    pub saves: AtomicUsize,
}

impl MockAvailabilityRepository {
    pub fn new(book: AvailabilityBook) -> Self {
        Self { book: Mutex::new(book), saves: AtomicUsize::new(0) }
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl AvailabilityRepository for MockAvailabilityRepository {
    fn load_availability(&self) -> DomainResult<AvailabilityBook> {
        Ok(self.book.lock().clone())
    }

    fn save_availability(&self, book: &AvailabilityBook) -> DomainResult<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.book.lock() = book.clone();
        Ok(())
    }
}

/// In-memory mock for `WindowSettingsRepository`.
#[derive(Default)]
pub struct MockWindowSettingsRepository {
    settings: Mutex<Option<EditWindowSettings>>,
}

impl WindowSettingsRepository for MockWindowSettingsRepository {
    fn load_settings(&self) -> DomainResult<Option<EditWindowSettings>> {
        Ok(self.settings.lock().clone())
    }

    fn save_settings(&self, settings: &EditWindowSettings) -> DomainResult<()> {
        *self.settings.lock() = Some(settings.clone());
        Ok(())
    }
}

/// In-memory mock for `SchemaRepository`.
#[derive(Default)]
pub struct MockSchemaRepository {
    version: Mutex<u32>,
}

impl MockSchemaRepository {
    pub fn at(version: u32) -> Self {
        Self { version: Mutex::new(version) }
    }
}

impl SchemaRepository for MockSchemaRepository {
    fn schema_version(&self) -> DomainResult<u32> {
        Ok(*self.version.lock())
    }

    fn set_schema_version(&self, version: u32) -> DomainResult<()> {
        *self.version.lock() = version;
        Ok(())
    }
}
