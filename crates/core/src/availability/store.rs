//! Staged availability editing for one loaded month
//!
//! The store is opened over a freshly built month calendar. Mutations go to
//! a draft of the whole availability book; [`AvailabilityStore::confirm`]
//! reloads the stored book, writes onto it only the loaded month's dates the
//! draft changed, and promotes the result to the confirmed snapshot. Edits
//! confirmed meanwhile by other sessions, in any month, survive. A mutation is
//! silently ignored when the edit gate refuses it, when the date lies
//! outside the loaded month, or when the event is not on that date.

use std::sync::Arc;

use chrono::NaiveDate;
use roster_domain::{
    Actor, AvailabilityBook, EventKey, MonthCalendar, Result, UserId, YearMonth,
};
use tracing::{debug, info};

use super::ports::AvailabilityRepository;
use crate::staging::Staged;
use crate::window::EditGate;

/// Draft/confirm availability editing over one month calendar.
pub struct AvailabilityStore {
    repository: Arc<dyn AvailabilityRepository>,
    calendar: MonthCalendar,
    gate: EditGate,
    book: Staged<AvailabilityBook>,
}

impl AvailabilityStore {
    /// Load the confirmed book and start an empty draft over `calendar`.
    pub fn open(
        repository: Arc<dyn AvailabilityRepository>,
        calendar: MonthCalendar,
        gate: EditGate,
    ) -> Result<Self> {
        let book = repository.load_availability()?;
        Ok(Self { repository, calendar, gate, book: Staged::new(book) })
    }

    pub fn month(&self) -> YearMonth {
        self.calendar.month()
    }

    pub fn calendar(&self) -> &MonthCalendar {
        &self.calendar
    }

    pub fn gate(&self) -> &EditGate {
        &self.gate
    }

    /// Whether `actor` may currently edit `user` in the loaded month.
    pub fn can_edit(&self, actor: &Actor, user: &UserId) -> bool {
        self.gate.permits(actor, user, self.month())
    }

    /// Draft view: true iff the canonical key, or the legacy bare-time key
    /// of a fixed event, is set.
    pub fn is_available(&self, user: &UserId, date: NaiveDate, key: &EventKey) -> bool {
        self.book.draft().is_available(user, date, key)
    }

    /// Set or clear availability in the draft.
    pub fn set_available(
        &mut self,
        actor: &Actor,
        user: &UserId,
        date: NaiveDate,
        key: &EventKey,
        value: bool,
    ) {
        if !self.accepts(actor, user, date, key) {
            return;
        }
        self.book.draft_mut().set(user, date, key, value);
    }

    /// Flip availability in the draft.
    pub fn toggle(&mut self, actor: &Actor, user: &UserId, date: NaiveDate, key: &EventKey) {
        let value = !self.is_available(user, date, key);
        self.set_available(actor, user, date, key, value);
    }

    /// Users confirmed (not drafted) for `key` on `date`.
    pub fn confirmed_count(&self, date: NaiveDate, key: &EventKey) -> usize {
        self.book.snapshot().confirmed_count(date, key)
    }

    /// Number of events `user` has selected in the loaded month, draft view.
    pub fn selection_count(&self, user: &UserId) -> usize {
        self.book.draft().selection_count(user, self.month())
    }

    pub fn is_dirty(&self) -> bool {
        self.book.is_dirty()
    }

    /// Merge the draft's changes to the loaded month into the stored book,
    /// persist it, and make the merged book the confirmed snapshot.
    pub fn confirm(&mut self) -> Result<()> {
        if !self.is_dirty() {
            return Ok(());
        }
        let mut stored = self.repository.load_availability()?;
        let written =
            stored.apply_month_changes(self.month(), self.book.snapshot(), self.book.draft());
        self.repository.save_availability(&stored)?;
        self.book = Staged::new(stored);
        info!(month = %self.month(), dates = written, "Confirmed availability changes");
        Ok(())
    }

    /// Drop every unconfirmed change.
    pub fn discard(&mut self) {
        if self.is_dirty() {
            debug!(month = %self.month(), "Discarding availability draft");
        }
        self.book.discard();
    }

    pub(crate) fn accepts(
        &self,
        actor: &Actor,
        user: &UserId,
        date: NaiveDate,
        key: &EventKey,
    ) -> bool {
        if !self.month().contains(date) {
            debug!(user = %user, %date, month = %self.month(), "Ignoring edit outside the month");
            return false;
        }
        if self.calendar.find(date, key).is_none() {
            debug!(user = %user, %date, key = %key, "Ignoring edit for an event not on the date");
            return false;
        }
        if !self.can_edit(actor, user) {
            debug!(
                actor = %actor.user_id,
                user = %user,
                month = %self.month(),
                "Ignoring edit outside the edit window"
            );
            return false;
        }
        true
    }

    pub(crate) fn draft_mut(&mut self) -> &mut AvailabilityBook {
        self.book.draft_mut()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;
    use parking_lot::Mutex;
    use roster_domain::{EditWindowSettings, ExtraEventsByMonth, SlotTime, TimeSlot};

    use super::*;
    use crate::calendar::assemble_month;
    use crate::window::FixedClock;

    #[derive(Default)]
    struct MemoryBook(Mutex<AvailabilityBook>);

    impl AvailabilityRepository for MemoryBook {
        fn load_availability(&self) -> Result<AvailabilityBook> {
            Ok(self.0.lock().clone())
        }

        fn save_availability(&self, book: &AvailabilityBook) -> Result<()> {
            *self.0.lock() = book.clone();
            Ok(())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn april_store(today: NaiveDate) -> (Arc<MemoryBook>, AvailabilityStore) {
        let month = YearMonth::new(2025, 4).unwrap();
        let slots = [TimeSlot::new(Weekday::Mon, SlotTime::new(6, 30), 4, 12)];
        let calendar = assemble_month(month, &slots, &ExtraEventsByMonth::new());
        let repo = Arc::new(MemoryBook::default());
        let gate = EditGate::new(EditWindowSettings::default(), Arc::new(FixedClock(today)));
        let store = AvailabilityStore::open(repo.clone(), calendar, gate).unwrap();
        (repo, store)
    }

    fn key() -> EventKey {
        EventKey::fixed(SlotTime::new(6, 30))
    }

    #[test]
    fn test_confirm_persists_and_updates_counts() {
        let (repo, mut store) = april_store(date(2025, 3, 1));
        let admin = Actor::admin("root");
        let ana = UserId::from("ana");

        store.set_available(&admin, &ana, date(2025, 4, 7), &key(), true);
        assert!(store.is_dirty());
        assert!(store.is_available(&ana, date(2025, 4, 7), &key()));
        assert_eq!(store.confirmed_count(date(2025, 4, 7), &key()), 0);

        store.confirm().unwrap();
        assert!(!store.is_dirty());
        assert_eq!(store.confirmed_count(date(2025, 4, 7), &key()), 1);
        let stored = repo.load_availability().unwrap();
        assert_eq!(stored.confirmed_count(date(2025, 4, 7), &key()), 1);
    }

    #[test]
    fn test_confirm_keeps_records_saved_by_another_session() {
        let (repo, mut store) = april_store(date(2025, 3, 1));
        let admin = Actor::admin("root");
        let ana = UserId::from("ana");
        let bia = UserId::from("bia");

        store.set_available(&admin, &ana, date(2025, 4, 7), &key(), true);

        // Confirmed elsewhere after this store was opened
        let mut elsewhere = repo.load_availability().unwrap();
        elsewhere.set(&bia, date(2025, 4, 14), &key(), true);
        elsewhere.set(&bia, date(2025, 5, 5), &key(), true);
        repo.save_availability(&elsewhere).unwrap();

        store.confirm().unwrap();

        let stored = repo.load_availability().unwrap();
        assert!(stored.is_available(&ana, date(2025, 4, 7), &key()));
        assert!(stored.is_available(&bia, date(2025, 4, 14), &key()));
        assert!(stored.is_available(&bia, date(2025, 5, 5), &key()));
        assert_eq!(store.confirmed_count(date(2025, 4, 14), &key()), 1);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_discard_restores_snapshot() {
        let (_repo, mut store) = april_store(date(2025, 3, 1));
        let admin = Actor::admin("root");
        let ana = UserId::from("ana");

        store.toggle(&admin, &ana, date(2025, 4, 7), &key());
        store.discard();
        assert!(!store.is_dirty());
        assert!(!store.is_available(&ana, date(2025, 4, 7), &key()));
    }

    #[test]
    fn test_rejected_edits_are_noops() {
        let (_repo, mut store) = april_store(date(2025, 3, 25));
        let admin = Actor::admin("root");
        let ana = UserId::from("ana");

        // outside the month, and a date without that event
        store.set_available(&admin, &ana, date(2025, 5, 5), &key(), true);
        store.set_available(&admin, &ana, date(2025, 4, 8), &key(), true);
        // volunteer with the auto window of April closed on March 25
        store.set_available(&Actor::volunteer("ana"), &ana, date(2025, 4, 7), &key(), true);
        // someone else's availability
        store.set_available(&Actor::volunteer("bia"), &ana, date(2025, 4, 7), &key(), true);

        assert!(!store.is_dirty());
    }
}
