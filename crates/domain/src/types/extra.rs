//! One-off extra events

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::month::YearMonth;
use super::time::SlotTime;
use crate::constants::{BANNED_EXTRA_NAME, BANNED_EXTRA_TIME};

/// A one-off event on an explicit date. Identity is `(date, time, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraEvent {
    pub date: NaiveDate,
    pub time: SlotTime,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "min")]
    pub min_staff: u32,
    #[serde(default, alias = "max")]
    pub max_staff: u32,
}

/// Extra events grouped by the month of their date.
pub type ExtraEventsByMonth = BTreeMap<YearMonth, Vec<ExtraEvent>>;

impl ExtraEvent {
    pub fn new(
        date: NaiveDate,
        time: SlotTime,
        name: impl Into<String>,
        min_staff: u32,
        max_staff: u32,
    ) -> Self {
        Self { date, time, name: name.into(), min_staff, max_staff }
    }

    /// Month this event is filed under.
    pub fn year_month(&self) -> YearMonth {
        YearMonth::of(self.date)
    }

    /// Same `(date, time, name)` identity.
    pub fn same_identity(&self, other: &Self) -> bool {
        self.date == other.date && self.time == other.time && self.name == other.name
    }

    pub fn is_banned(&self) -> bool {
        is_banned_extra(self.time, &self.name)
    }
}

/// The permanently excluded extra: midnight, named for the Sacred Heart.
///
/// The name match is a trimmed, upper-cased containment test so casing and
/// decorations around the name do not let it through.
pub fn is_banned_extra(time: SlotTime, name: &str) -> bool {
    time.to_string() == BANNED_EXTRA_TIME && name.trim().to_uppercase().contains(BANNED_EXTRA_NAME)
}
