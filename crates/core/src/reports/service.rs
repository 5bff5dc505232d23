//! Staffing reports over confirmed availability

use std::sync::Arc;

use chrono::NaiveDate;
use roster_domain::{
    AvailabilityBook, EventKey, EventRoster, MonthCalendar, Result, SelectionTally, ShortageEntry,
    UserId, YearMonth,
};
use tracing::info;

use crate::availability::ports::AvailabilityRepository;
use crate::calendar::CalendarBuilder;

/// Understaffed events of `calendar`, ordered by date then time.
pub fn shortages(calendar: &MonthCalendar, book: &AvailabilityBook) -> Vec<ShortageEntry> {
    calendar
        .iter()
        .filter_map(|(date, event)| {
            let confirmed = book.confirmed_count(date, &event.key());
            ShortageEntry::for_event(event, u32::try_from(confirmed).unwrap_or(u32::MAX))
        })
        .collect()
}

/// Selections per user in `month`, most selections first, ties by user id.
pub fn tally(month: YearMonth, book: &AvailabilityBook) -> Vec<SelectionTally> {
    let mut rows: Vec<SelectionTally> = book
        .user_ids()
        .map(|user| SelectionTally {
            user_id: user.clone(),
            selections: u32::try_from(book.selection_count(user, month)).unwrap_or(u32::MAX),
        })
        .filter(|row| row.selections > 0)
        .collect();
    rows.sort_by(|a, b| b.selections.cmp(&a.selections).then_with(|| a.user_id.cmp(&b.user_id)));
    rows
}

/// Available users per event of `calendar`, in calendar order.
pub fn rosters(calendar: &MonthCalendar, book: &AvailabilityBook) -> Vec<EventRoster> {
    calendar
        .iter()
        .map(|(date, event)| EventRoster {
            event: event.clone(),
            user_ids: book.available_users(date, &event.key()).into_iter().cloned().collect(),
        })
        .collect()
}

/// Builds reports from a freshly rebuilt calendar and the confirmed book.
pub struct ReportService {
    builder: Arc<CalendarBuilder>,
    availability: Arc<dyn AvailabilityRepository>,
}

impl ReportService {
    pub fn new(
        builder: Arc<CalendarBuilder>,
        availability: Arc<dyn AvailabilityRepository>,
    ) -> Self {
        Self { builder, availability }
    }

    /// Every event of `month` with fewer confirmed volunteers than its
    /// minimum. The month is rebuilt first.
    pub fn shortage_report(&self, month: YearMonth) -> Result<Vec<ShortageEntry>> {
        let calendar = self.builder.build_month(month)?;
        let book = self.availability.load_availability()?;
        let rows = shortages(&calendar, &book);
        info!(month = %month, shortages = rows.len(), "Built shortage report");
        Ok(rows)
    }

    pub fn selection_tally(&self, month: YearMonth) -> Result<Vec<SelectionTally>> {
        // rebuild so swept records do not count
        self.builder.build_month(month)?;
        let book = self.availability.load_availability()?;
        Ok(tally(month, &book))
    }

    /// Users available for one event, `None` if the event is not on `date`.
    pub fn event_roster(&self, date: NaiveDate, key: &EventKey) -> Result<Option<EventRoster>> {
        let calendar = self.builder.build_month(YearMonth::of(date))?;
        let Some(event) = calendar.find(date, key) else { return Ok(None) };
        let book = self.availability.load_availability()?;
        let user_ids: Vec<UserId> = book.available_users(date, key).into_iter().cloned().collect();
        Ok(Some(EventRoster { event: event.clone(), user_ids }))
    }

    /// Rosters for every event of `month`.
    pub fn month_rosters(&self, month: YearMonth) -> Result<Vec<EventRoster>> {
        let calendar = self.builder.build_month(month)?;
        let book = self.availability.load_availability()?;
        Ok(rosters(&calendar, &book))
    }
}
