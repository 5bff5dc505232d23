//! Key-value implementation of the built-calendar cache.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use roster_core::CalendarRepository;
use roster_domain::{CalendarEvent, MonthCalendar, Result, YearMonth};
use tracing::{debug, instrument};

use crate::storage::records::{self, CALENDAR_KEY};
use crate::storage::KvStore;

type StoredCalendars = BTreeMap<YearMonth, BTreeMap<NaiveDate, Vec<CalendarEvent>>>;

/// Built calendars stored as `"YYYY-MM"` → ISO date → events.
///
/// The record is a derived cache; a malformed one is discarded and the next
/// build repopulates it.
pub struct KvCalendarRepository {
    store: Arc<dyn KvStore>,
}

impl KvCalendarRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    fn load_all(&self) -> Result<StoredCalendars> {
        Ok(records::load_record(self.store.as_ref(), CALENDAR_KEY)?.unwrap_or_default())
    }
}

impl CalendarRepository for KvCalendarRepository {
    #[instrument(skip(self), fields(month = %month))]
    fn load_month(&self, month: YearMonth) -> Result<Option<MonthCalendar>> {
        let mut all = self.load_all()?;
        Ok(all.remove(&month).map(|days| MonthCalendar::from_days(month, days)))
    }

    #[instrument(skip(self, calendar), fields(month = %calendar.month()))]
    fn save_month(&self, calendar: &MonthCalendar) -> Result<()> {
        let mut all = self.load_all()?;
        all.insert(calendar.month(), calendar.days().clone());
        records::save_record(self.store.as_ref(), CALENDAR_KEY, &all)?;
        debug!(events = calendar.event_count(), "Cached month calendar");
        Ok(())
    }

    fn cached_months(&self) -> Result<Vec<YearMonth>> {
        Ok(self.load_all()?.into_keys().collect())
    }
}
