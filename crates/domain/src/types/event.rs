//! Calendar events and the consolidated month calendar

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::extra::{is_banned_extra, ExtraEvent};
use super::key::EventKey;
use super::month::YearMonth;
use super::slot::TimeSlot;
use super::time::SlotTime;

/// Where an occurrence came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Generated from a recurring weekly slot
    Fixed,
    /// Taken from the extra event registry
    Extra,
}

crate::impl_keyword_conversions!(EventKind {
    Fixed => "fixed",
    Extra => "extra",
});

/// One occurrence on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub date: NaiveDate,
    pub time: SlotTime,
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub min_staff: u32,
    pub max_staff: u32,
}

impl CalendarEvent {
    /// Fixed occurrence of `slot` on `date`.
    pub fn fixed(date: NaiveDate, slot: &TimeSlot) -> Self {
        Self {
            date,
            time: slot.time,
            kind: EventKind::Fixed,
            name: None,
            min_staff: slot.min_staff,
            max_staff: slot.max_staff,
        }
    }

    pub fn extra(extra: &ExtraEvent) -> Self {
        Self {
            date: extra.date,
            time: extra.time,
            kind: EventKind::Extra,
            name: Some(extra.name.clone()),
            min_staff: extra.min_staff,
            max_staff: extra.max_staff,
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.kind == EventKind::Fixed
    }

    /// Name for display and identity; empty for fixed events.
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Stable identity of this occurrence within its date.
    pub fn key(&self) -> EventKey {
        match self.kind {
            EventKind::Fixed => EventKey::fixed(self.time),
            EventKind::Extra => EventKey::extra(self.time, self.name_or_empty()),
        }
    }

    /// Only extras can be banned; a fixed slot at midnight is legitimate.
    pub fn is_banned(&self) -> bool {
        self.kind == EventKind::Extra && is_banned_extra(self.time, self.name_or_empty())
    }
}

/// Canonical key string of an event.
pub fn event_key(event: &CalendarEvent) -> String {
    event.key().canonical()
}

/// Per-date event lists for one month.
///
/// Every date of the month is present, possibly with an empty list. Lists
/// are kept sorted by time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCalendar {
    month: YearMonth,
    days: BTreeMap<NaiveDate, Vec<CalendarEvent>>,
}

impl MonthCalendar {
    /// Calendar with every date of `month` mapped to an empty list.
    pub fn empty(month: YearMonth) -> Self {
        Self { month, days: month.days().map(|d| (d, Vec::new())).collect() }
    }

    /// Rehydrate a stored calendar. Dates outside `month` are dropped and
    /// missing dates are filled with empty lists.
    pub fn from_days(month: YearMonth, days: BTreeMap<NaiveDate, Vec<CalendarEvent>>) -> Self {
        let mut calendar = Self::empty(month);
        for (date, mut events) in days {
            if let Some(slot) = calendar.days.get_mut(&date) {
                events.retain(|ev| !ev.is_banned());
                events.sort_by(|a, b| a.time.cmp(&b.time));
                *slot = events;
            }
        }
        calendar
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn days(&self) -> &BTreeMap<NaiveDate, Vec<CalendarEvent>> {
        &self.days
    }

    pub fn into_days(self) -> BTreeMap<NaiveDate, Vec<CalendarEvent>> {
        self.days
    }

    /// Events on `date`; empty for dates outside the month.
    pub fn events_on(&self, date: NaiveDate) -> &[CalendarEvent] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or_default()
    }

    /// Mutable list for a date of this month.
    pub fn events_on_mut(&mut self, date: NaiveDate) -> Option<&mut Vec<CalendarEvent>> {
        self.days.get_mut(&date)
    }

    /// All `(date, event)` pairs ordered by date then time.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &CalendarEvent)> + '_ {
        self.days.iter().flat_map(|(date, events)| events.iter().map(move |ev| (*date, ev)))
    }

    pub fn event_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Canonical keys valid on `date`.
    pub fn valid_keys(&self, date: NaiveDate) -> BTreeSet<String> {
        self.events_on(date).iter().map(event_key).collect()
    }

    /// The event on `date` with identity `key`, if present.
    pub fn find(&self, date: NaiveDate, key: &EventKey) -> Option<&CalendarEvent> {
        self.events_on(date).iter().find(|ev| ev.key() == *key)
    }

    /// Fixed event at `time` on `date`, if present.
    pub fn find_fixed(&self, date: NaiveDate, time: SlotTime) -> Option<&CalendarEvent> {
        self.events_on(date).iter().find(|ev| ev.is_fixed() && ev.time == time)
    }

    /// Dates of the month falling on `weekday`.
    pub fn dates_on(&self, weekday: Weekday) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied().filter(move |d| d.weekday() == weekday)
    }

    /// Distinct fixed times occurring on `weekday` this month, ascending.
    pub fn fixed_times_on(&self, weekday: Weekday) -> Vec<SlotTime> {
        let times: BTreeSet<SlotTime> = self
            .dates_on(weekday)
            .flat_map(|date| self.events_on(date).iter())
            .filter(|ev| ev.is_fixed())
            .map(|ev| ev.time)
            .collect();
        times.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_calendar_covers_every_date() {
        let calendar = MonthCalendar::empty(ym(2025, 2));
        assert_eq!(calendar.days().len(), 28);
        assert_eq!(calendar.event_count(), 0);
        assert!(calendar.events_on(date(2025, 3, 1)).is_empty());
    }

    #[test]
    fn test_event_keys_by_kind() {
        let slot = TimeSlot::new(Weekday::Mon, SlotTime::new(6, 30), 4, 12);
        let fixed = CalendarEvent::fixed(date(2025, 4, 7), &slot);
        assert_eq!(event_key(&fixed), "F|06:30");

        let extra = ExtraEvent::new(date(2025, 4, 7), SlotTime::new(6, 30), "Vigil", 2, 6);
        assert_eq!(event_key(&CalendarEvent::extra(&extra)), "X|06:30|Vigil");
    }

    #[test]
    fn test_midnight_fixed_slot_is_not_banned() {
        let slot = TimeSlot::new(Weekday::Mon, SlotTime::MIDNIGHT, 1, 2);
        let mut fixed = CalendarEvent::fixed(date(2025, 4, 7), &slot);
        fixed.name = Some("Sagrado Coração de Jesus".to_string());
        assert!(!fixed.is_banned());
    }

    #[test]
    fn test_from_days_filters_banned_and_foreign_dates() {
        let banned =
            ExtraEvent::new(date(2025, 6, 1), SlotTime::MIDNIGHT, "Sagrado Coração de Jesus", 1, 2);
        let kept = ExtraEvent::new(date(2025, 6, 1), SlotTime::new(9, 0), "Procissão", 1, 2);
        let foreign = ExtraEvent::new(date(2025, 7, 1), SlotTime::new(9, 0), "Julho", 1, 2);

        let mut days = BTreeMap::new();
        days.insert(
            date(2025, 6, 1),
            vec![CalendarEvent::extra(&kept), CalendarEvent::extra(&banned)],
        );
        days.insert(date(2025, 7, 1), vec![CalendarEvent::extra(&foreign)]);

        let calendar = MonthCalendar::from_days(ym(2025, 6), days);
        assert_eq!(calendar.days().len(), 30);
        assert_eq!(calendar.event_count(), 1);
        assert_eq!(calendar.events_on(date(2025, 6, 1))[0].name.as_deref(), Some("Procissão"));
    }

    #[test]
    fn test_serialized_event_omits_missing_name() {
        let slot = TimeSlot::new(Weekday::Mon, SlotTime::new(6, 30), 4, 12);
        let json = serde_json::to_value(CalendarEvent::fixed(date(2025, 4, 7), &slot)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "date": "2025-04-07",
                "time": "06:30",
                "kind": "fixed",
                "minStaff": 4,
                "maxStaff": 12
            })
        );
    }
}
