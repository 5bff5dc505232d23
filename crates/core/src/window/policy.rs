//! Edit window decisions
//!
//! Rules, first match wins:
//! 1. the month has an override with at least one bound: open iff
//!    `from <= today <= to`, a missing bound being unbounded;
//! 2. manual mode: open iff `manual_open`;
//! 3. auto mode: open from `last_day - (N - 1)` through day 1 of the
//!    following month, where `N = max(1, auto_days_before_end)`.
//!
//! Administrators may always edit. Everyone else may edit only the target
//! month (the month after today) and only while its window is open.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use roster_domain::{Actor, EditWindowSettings, UserId, WindowMode, YearMonth};

use super::ports::Clock;

/// Inclusive date range of the auto window for `month`.
pub fn auto_window(settings: &EditWindowSettings, month: YearMonth) -> (NaiveDate, NaiveDate) {
    let last = month.last_day();
    let lead = u64::from(settings.effective_auto_days() - 1);
    let start = last.checked_sub_days(Days::new(lead)).unwrap_or(NaiveDate::MIN);
    (start, month.next().first_day())
}

/// Whether non-administrators may edit `month` on `today`.
pub fn is_open(settings: &EditWindowSettings, month: YearMonth, today: NaiveDate) -> bool {
    if let Some(range) = settings.override_for(month) {
        return range.contains(today);
    }
    match settings.mode {
        WindowMode::Manual => settings.manual_open,
        WindowMode::Auto => {
            let (start, end) = auto_window(settings, month);
            start <= today && today <= end
        }
    }
}

/// The only month non-administrators may ever edit: the one after `today`.
pub fn target_month(today: NaiveDate) -> YearMonth {
    YearMonth::of(today).next()
}

/// Whether `actor` may edit `month` on `today`.
pub fn can_edit(
    settings: &EditWindowSettings,
    actor: &Actor,
    month: YearMonth,
    today: NaiveDate,
) -> bool {
    actor.is_admin() || (month == target_month(today) && is_open(settings, month, today))
}

/// Month a staffing report should show: next month while its window is
/// open, otherwise the current month.
pub fn report_month(settings: &EditWindowSettings, today: NaiveDate) -> YearMonth {
    let next = target_month(today);
    if is_open(settings, next, today) {
        next
    } else {
        YearMonth::of(today)
    }
}

/// Window settings plus a clock, evaluated at every check.
#[derive(Clone)]
pub struct EditGate {
    settings: EditWindowSettings,
    clock: Arc<dyn Clock>,
}

impl EditGate {
    pub fn new(settings: EditWindowSettings, clock: Arc<dyn Clock>) -> Self {
        Self { settings, clock }
    }

    pub fn settings(&self) -> &EditWindowSettings {
        &self.settings
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Whether `actor` may change `user`'s availability in `month` right now.
    pub fn permits(&self, actor: &Actor, user: &UserId, month: YearMonth) -> bool {
        actor.may_act_for(user) && can_edit(&self.settings, actor, month, self.today())
    }
}

impl std::fmt::Debug for EditGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditGate").field("settings", &self.settings).finish_non_exhaustive()
    }
}
