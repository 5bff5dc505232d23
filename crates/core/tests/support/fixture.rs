//! Engine wiring over the in-memory repositories

use std::sync::Arc;

use chrono::{NaiveDate, Weekday};
use roster_core::{AvailabilityStore, CalendarBuilder, EditGate, FixedClock, ReportService};
use roster_domain::{
    AvailabilityBook, EditWindowSettings, ExtraEvent, ExtraEventsByMonth, SlotTime, TimeSlot,
    YearMonth,
};

use super::repositories::{
    MockAvailabilityRepository, MockCalendarRepository, MockExtraEventRepository,
    MockSlotRepository,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn ym(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).unwrap()
}

pub fn slot(weekday: Weekday, h: u32, m: u32, min_staff: u32) -> TimeSlot {
    TimeSlot::new(weekday, SlotTime::new(h, m), min_staff, 12)
}

pub fn extra(date: NaiveDate, h: u32, m: u32, name: &str, min_staff: u32) -> ExtraEvent {
    ExtraEvent::new(date, SlotTime::new(h, m), name, min_staff, 11)
}

/// Repositories plus the services built over them.
pub struct Engine {
    pub slots: Arc<MockSlotRepository>,
    pub extras: Arc<MockExtraEventRepository>,
    pub calendars: Arc<MockCalendarRepository>,
    pub availability: Arc<MockAvailabilityRepository>,
    pub builder: Arc<CalendarBuilder>,
}

impl Engine {
    pub fn new(slots: Vec<TimeSlot>, extras: Vec<ExtraEvent>, book: AvailabilityBook) -> Self {
        let mut grouped = ExtraEventsByMonth::new();
        for e in extras {
            grouped.entry(e.year_month()).or_default().push(e);
        }

        let slots = Arc::new(MockSlotRepository::new(slots));
        let extras = Arc::new(MockExtraEventRepository::new(grouped));
        let calendars = Arc::new(MockCalendarRepository::default());
        let availability = Arc::new(MockAvailabilityRepository::new(book));
        let builder = Arc::new(CalendarBuilder::new(
            slots.clone(),
            extras.clone(),
            calendars.clone(),
            availability.clone(),
        ));
        Self { slots, extras, calendars, availability, builder }
    }

    pub fn reports(&self) -> ReportService {
        ReportService::new(self.builder.clone(), self.availability.clone())
    }

    /// Store over a freshly built `month`, with the window evaluated on `today`.
    pub fn store(
        &self,
        month: YearMonth,
        settings: EditWindowSettings,
        today: NaiveDate,
    ) -> AvailabilityStore {
        let calendar = self.builder.build_month(month).unwrap();
        let gate = EditGate::new(settings, Arc::new(FixedClock(today)));
        AvailabilityStore::open(self.availability.clone(), calendar, gate).unwrap()
    }
}

/// Book from a JSON literal in the stored layout.
pub fn book(json: serde_json::Value) -> AvailabilityBook {
    serde_json::from_value(json).unwrap()
}
