//! Month calendar consolidation
//!
//! A month is always rebuilt from scratch: active weekly slots become fixed
//! events, extras filed under the month are attached to their dates, and the
//! result replaces whatever was cached. Availability records that no longer
//! match an event on their date are then swept for every user.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use roster_domain::{
    AvailabilityBook, CalendarEvent, EventKey, ExtraEventsByMonth, MonthCalendar, Result,
    RosterError, TimeSlot, YearMonth,
};
use tracing::{debug, info};

use super::ports::{CalendarRepository, ExtraEventRepository, SlotRepository};
use crate::availability::ports::AvailabilityRepository;

/// Merge slots and extras into the calendar of `month`.
///
/// Inactive slots, extras dated outside the month and the banned extra are
/// skipped. A repeated `(date, time, name)` extra replaces the earlier one.
/// Each date's list is ordered by time, fixed events first on ties.
pub fn assemble_month(
    month: YearMonth,
    slots: &[TimeSlot],
    extras: &ExtraEventsByMonth,
) -> MonthCalendar {
    let mut days: BTreeMap<NaiveDate, Vec<CalendarEvent>> = BTreeMap::new();

    for date in month.days() {
        let mut events: Vec<CalendarEvent> = Vec::new();
        for slot in slots.iter().filter(|s| s.active && s.weekday == date.weekday()) {
            if events.iter().any(|ev| ev.time == slot.time) {
                continue;
            }
            events.push(CalendarEvent::fixed(date, slot));
        }
        days.insert(date, events);
    }

    for extra in extras.get(&month).into_iter().flatten() {
        if extra.is_banned() || !month.contains(extra.date) {
            continue;
        }
        let Some(events) = days.get_mut(&extra.date) else { continue };
        let event = CalendarEvent::extra(extra);
        match events.iter_mut().find(|ev| !ev.is_fixed() && ev.key() == event.key()) {
            Some(existing) => *existing = event,
            None => events.push(event),
        }
    }

    MonthCalendar::from_days(month, days)
}

/// Whether a stored availability key names an event present on `date`.
///
/// Legacy bare-time keys parse as fixed keys, so they are valid exactly when
/// their `F|HH:MM` form is.
pub fn key_is_valid(calendar: &MonthCalendar, date: NaiveDate, raw_key: &str) -> bool {
    EventKey::parse(raw_key).is_some_and(|key| calendar.find(date, &key).is_some())
}

/// Remove every record of the calendar's month whose key is not valid on
/// its date. Returns the number of keys removed.
pub fn sweep_month(book: &mut AvailabilityBook, calendar: &MonthCalendar) -> usize {
    book.retain_month(calendar.month(), |date, key| key_is_valid(calendar, date, key))
}

/// Builds, caches and garbage-collects month calendars.
pub struct CalendarBuilder {
    slots: Arc<dyn SlotRepository>,
    extras: Arc<dyn ExtraEventRepository>,
    calendars: Arc<dyn CalendarRepository>,
    availability: Arc<dyn AvailabilityRepository>,
}

impl CalendarBuilder {
    pub fn new(
        slots: Arc<dyn SlotRepository>,
        extras: Arc<dyn ExtraEventRepository>,
        calendars: Arc<dyn CalendarRepository>,
        availability: Arc<dyn AvailabilityRepository>,
    ) -> Self {
        Self { slots, extras, calendars, availability }
    }

    /// Rebuild `year`/`month` (1-based month).
    pub fn build(&self, year: i32, month: u32) -> Result<MonthCalendar> {
        let month = YearMonth::new(year, month)
            .ok_or_else(|| RosterError::InvalidInput(format!("no such month: {year}-{month}")))?;
        self.build_month(month)
    }

    /// Rebuild `month` from the current registries, persist it, and sweep
    /// availability records that reference vanished events.
    pub fn build_month(&self, month: YearMonth) -> Result<MonthCalendar> {
        let slots = self.slots.load_slots()?;
        let extras = self.extras.load_extras()?;
        let calendar = assemble_month(month, &slots, &extras);

        self.calendars.save_month(&calendar)?;
        let pruned = self.collect_garbage(&calendar)?;

        info!(month = %month, events = calendar.event_count(), pruned, "Rebuilt month calendar");
        Ok(calendar)
    }

    /// Last built calendar for `month` without rebuilding.
    pub fn cached(&self, month: YearMonth) -> Result<Option<MonthCalendar>> {
        self.calendars.load_month(month)
    }

    fn collect_garbage(&self, calendar: &MonthCalendar) -> Result<usize> {
        let mut book = self.availability.load_availability()?;
        let pruned = sweep_month(&mut book, calendar);
        if pruned > 0 {
            debug!(month = %calendar.month(), pruned, "Removing availability for vanished events");
            self.availability.save_availability(&book)?;
        }
        Ok(pruned)
    }
}
