//! Staged editing of the extra event registry
//!
//! Additions and removals collect in a draft. Confirming saves the draft and
//! rebuilds every month it touches, which also sweeps availability recorded
//! against removed extras.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use roster_domain::constants::{DEFAULT_EXTRA_MAX_STAFF, DEFAULT_MIN_STAFF};
use roster_domain::{ExtraEvent, ExtraEventsByMonth, Result, SlotTime, YearMonth};
use tracing::{debug, info};

use crate::calendar::ports::ExtraEventRepository;
use crate::calendar::CalendarBuilder;
use crate::staging::Staged;

/// Input for a new extra event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExtra {
    pub date: NaiveDate,
    /// Free-form time, normalized on insert
    pub time: String,
    pub name: String,
    pub min_staff: u32,
    pub max_staff: u32,
}

impl NewExtra {
    /// New extra with the default staffing bounds.
    pub fn new(date: NaiveDate, time: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            date,
            time: time.into(),
            name: name.into(),
            min_staff: DEFAULT_MIN_STAFF,
            max_staff: DEFAULT_EXTRA_MAX_STAFF,
        }
    }

    pub fn with_staffing(mut self, min_staff: u32, max_staff: u32) -> Self {
        self.min_staff = min_staff;
        self.max_staff = max_staff;
        self
    }
}

/// Draft/confirm editor over the extra event registry.
pub struct ExtraEventEditor {
    repository: Arc<dyn ExtraEventRepository>,
    builder: Arc<CalendarBuilder>,
    extras: Staged<ExtraEventsByMonth>,
}

impl ExtraEventEditor {
    pub fn open(
        repository: Arc<dyn ExtraEventRepository>,
        builder: Arc<CalendarBuilder>,
    ) -> Result<Self> {
        let extras = repository.load_extras()?;
        Ok(Self { repository, builder, extras: Staged::new(extras) })
    }

    /// Draft extras filed under `month`.
    pub fn list(&self, month: YearMonth) -> &[ExtraEvent] {
        self.extras.draft().get(&month).map(Vec::as_slice).unwrap_or_default()
    }

    /// Append an extra to the month of its date.
    ///
    /// Returns the month it was filed under, or `None` when the name or the
    /// time is blank.
    pub fn add(&mut self, input: NewExtra) -> Option<YearMonth> {
        if input.name.trim().is_empty() || input.time.trim().is_empty() {
            debug!(date = %input.date, "Ignoring extra without name or time");
            return None;
        }

        let time = SlotTime::normalize(&input.time);
        let max_staff = input.max_staff.max(input.min_staff);
        let extra = ExtraEvent::new(input.date, time, input.name, input.min_staff, max_staff);
        let month = extra.year_month();
        self.extras.draft_mut().entry(month).or_default().push(extra);
        Some(month)
    }

    /// Remove the `index`-th extra of `month` from the draft. A month left
    /// without extras is dropped from the registry.
    pub fn remove(&mut self, month: YearMonth, index: usize) -> Option<ExtraEvent> {
        let draft = self.extras.draft_mut();
        let list = draft.get_mut(&month)?;
        let removed = (index < list.len()).then(|| list.remove(index));
        if list.is_empty() {
            draft.remove(&month);
        }
        removed
    }

    pub fn is_dirty(&self) -> bool {
        self.extras.is_dirty()
    }

    pub fn discard(&mut self) {
        self.extras.discard();
    }

    /// Save the draft and rebuild every month present in it or dropped from
    /// it. Returns the rebuilt months.
    pub fn confirm(&mut self) -> Result<Vec<YearMonth>> {
        if !self.is_dirty() {
            return Ok(Vec::new());
        }

        self.repository.save_extras(self.extras.draft())?;
        let months: BTreeSet<YearMonth> =
            self.extras.draft().keys().chain(self.extras.snapshot().keys()).copied().collect();
        self.extras.commit();

        for month in &months {
            self.builder.build_month(*month)?;
        }
        info!(months = months.len(), "Confirmed extra event changes");
        Ok(months.into_iter().collect())
    }
}
