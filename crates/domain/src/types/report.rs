//! Report rows produced from a month's calendar and availability

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::availability::UserId;
use super::event::CalendarEvent;

/// One understaffed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortageEntry {
    pub date: NaiveDate,
    pub event: CalendarEvent,
    pub min_staff: u32,
    pub confirmed: u32,
    /// Always positive; fully staffed events are not reported.
    pub missing: u32,
}

impl ShortageEntry {
    /// Row for `event`, or `None` when `confirmed` already meets the minimum.
    pub fn for_event(event: &CalendarEvent, confirmed: u32) -> Option<Self> {
        let missing = event.min_staff.saturating_sub(confirmed);
        (missing > 0).then(|| Self {
            date: event.date,
            event: event.clone(),
            min_staff: event.min_staff,
            confirmed,
            missing,
        })
    }
}

/// Number of availability selections a user made in a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionTally {
    pub user_id: UserId,
    pub selections: u32,
}

/// Volunteers available for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRoster {
    pub event: CalendarEvent,
    pub user_ids: Vec<UserId>,
}
