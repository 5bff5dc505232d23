//! Weekly recurrence: one fixed time on every date of a weekday

use chrono::{NaiveDate, Weekday};
use roster_domain::{Actor, EventKey, SlotTime, UserId};
use tracing::debug;

use super::store::AvailabilityStore;

impl AvailabilityStore {
    /// Set (`mark`) or clear `user`'s availability for the fixed event at
    /// `time` on every `weekday` of the loaded month. Dates without that
    /// fixed event are skipped. Clearing also removes legacy bare-time keys.
    ///
    /// Returns the dates that were changed in the draft.
    pub fn apply_recurrence(
        &mut self,
        actor: &Actor,
        user: &UserId,
        weekday: Weekday,
        time: SlotTime,
        mark: bool,
    ) -> Vec<NaiveDate> {
        let key = EventKey::fixed(time);
        let dates: Vec<NaiveDate> = self
            .calendar()
            .dates_on(weekday)
            .filter(|date| self.calendar().find_fixed(*date, time).is_some())
            .collect();

        let mut applied = Vec::with_capacity(dates.len());
        for date in dates {
            if !self.accepts(actor, user, date, &key) {
                continue;
            }
            self.draft_mut().set(user, date, &key, mark);
            applied.push(date);
        }

        debug!(
            user = %user,
            ?weekday,
            %time,
            mark,
            dates = applied.len(),
            "Applied weekly recurrence"
        );
        applied
    }

    /// Fixed times that occur on `weekday` in the loaded month, ascending.
    pub fn recurrence_times(&self, weekday: Weekday) -> Vec<SlotTime> {
        self.calendar().fixed_times_on(weekday)
    }
}
