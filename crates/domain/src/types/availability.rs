//! Volunteer availability records
//!
//! Layout: `user → month → date → key → true`. Absence means "not
//! available"; an explicit `false` is never kept, and date/month/user maps
//! that become empty are dropped so an undone edit leaves no trace.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::key::{is_legacy_key, migrate_legacy_key, EventKey};
use super::month::YearMonth;

/// Identifier of a volunteer (minister).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Stored keys for one date.
pub type DateFlags = BTreeMap<String, bool>;
/// One user's flags for one month.
pub type MonthFlags = BTreeMap<NaiveDate, DateFlags>;

/// Every availability record, for every user and month.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityBook {
    users: BTreeMap<UserId, BTreeMap<YearMonth, MonthFlags>>,
}

impl AvailabilityBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Users with at least one record anywhere.
    pub fn user_ids(&self) -> impl Iterator<Item = &UserId> {
        self.users.keys()
    }

    /// Stored flags of `user` on `date`.
    pub fn flags_on(&self, user: &UserId, date: NaiveDate) -> Option<&DateFlags> {
        self.users.get(user)?.get(&YearMonth::of(date))?.get(&date)
    }

    /// Stored flags of `user` for `month`.
    pub fn month_of(&self, user: &UserId, month: YearMonth) -> Option<&MonthFlags> {
        self.users.get(user)?.get(&month)
    }

    /// True if the canonical key, or for fixed events the legacy bare-time
    /// key, is set.
    pub fn is_available(&self, user: &UserId, date: NaiveDate, key: &EventKey) -> bool {
        self.flags_on(user, date)
            .is_some_and(|flags| key.spellings().any(|k| flags.get(&k).copied().unwrap_or(false)))
    }

    /// Set or withdraw availability.
    ///
    /// Setting writes the canonical key. Withdrawing removes every spelling
    /// of the key so a stale legacy flag cannot keep reading as available.
    pub fn set(&mut self, user: &UserId, date: NaiveDate, key: &EventKey, value: bool) {
        let month = YearMonth::of(date);
        if value {
            self.users
                .entry(user.clone())
                .or_default()
                .entry(month)
                .or_default()
                .entry(date)
                .or_default()
                .insert(key.canonical(), true);
            return;
        }

        let Some(months) = self.users.get_mut(user) else { return };
        if let Some(dates) = months.get_mut(&month) {
            if let Some(flags) = dates.get_mut(&date) {
                for spelling in key.spellings() {
                    flags.remove(&spelling);
                }
                if flags.is_empty() {
                    dates.remove(&date);
                }
            }
            if dates.is_empty() {
                months.remove(&month);
            }
        }
        if months.is_empty() {
            self.users.remove(user);
        }
    }

    /// Users available for `key` on `date`, in id order.
    pub fn available_users(&self, date: NaiveDate, key: &EventKey) -> Vec<&UserId> {
        self.users.keys().filter(|user| self.is_available(user, date, key)).collect()
    }

    /// Number of users available for `key` on `date`.
    pub fn confirmed_count(&self, date: NaiveDate, key: &EventKey) -> usize {
        self.users.keys().filter(|user| self.is_available(user, date, key)).count()
    }

    /// Number of true flags `user` holds in `month`.
    pub fn selection_count(&self, user: &UserId, month: YearMonth) -> usize {
        self.month_of(user, month)
            .map(|dates| dates.values().flat_map(BTreeMap::values).filter(|v| **v).count())
            .unwrap_or(0)
    }

    /// Keep only the month-`month` keys for which `keep(date, key)` holds,
    /// for every user. Maps left empty are removed. Returns the number of
    /// keys removed.
    pub fn retain_month<F>(&mut self, month: YearMonth, mut keep: F) -> usize
    where
        F: FnMut(NaiveDate, &str) -> bool,
    {
        let mut removed = 0;
        for months in self.users.values_mut() {
            let Some(dates) = months.get_mut(&month) else { continue };
            for (date, flags) in dates.iter_mut() {
                let before = flags.len();
                flags.retain(|key, _| keep(*date, key));
                removed += before - flags.len();
            }
            dates.retain(|_, flags| !flags.is_empty());
            if dates.is_empty() {
                months.remove(&month);
            }
        }
        self.users.retain(|_, months| !months.is_empty());
        removed
    }

    /// Keep only keys for which `keep(date, key)` holds across all months.
    /// Empty dates, months and users are removed. Returns the number of keys
    /// removed.
    pub fn retain_all<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(NaiveDate, &str) -> bool,
    {
        let mut removed = 0;
        for months in self.users.values_mut() {
            for dates in months.values_mut() {
                for (date, flags) in dates.iter_mut() {
                    let before = flags.len();
                    flags.retain(|key, _| keep(*date, key));
                    removed += before - flags.len();
                }
                dates.retain(|_, flags| !flags.is_empty());
            }
            months.retain(|_, dates| !dates.is_empty());
        }
        self.users.retain(|_, months| !months.is_empty());
        removed
    }

    /// Drop explicit `false` entries and anything left empty. Returns the
    /// number of entries dropped.
    pub fn strip_false(&mut self) -> usize {
        let mut dropped = 0;
        for months in self.users.values_mut() {
            for dates in months.values_mut() {
                for flags in dates.values_mut() {
                    let before = flags.len();
                    flags.retain(|_, value| *value);
                    dropped += before - flags.len();
                }
                dates.retain(|_, flags| !flags.is_empty());
            }
            months.retain(|_, dates| !dates.is_empty());
        }
        self.users.retain(|_, months| !months.is_empty());
        dropped
    }

    /// Rewrite legacy bare-time keys to `F|HH:MM`, keeping an existing
    /// canonical entry. Returns the number of keys rewritten.
    pub fn migrate_legacy_keys(&mut self) -> usize {
        let mut migrated = 0;
        for months in self.users.values_mut() {
            for dates in months.values_mut() {
                for flags in dates.values_mut() {
                    let legacy: Vec<String> =
                        flags.keys().filter(|k| is_legacy_key(k)).cloned().collect();
                    for old in legacy {
                        let value = flags.remove(&old).unwrap_or(false);
                        let entry = flags.entry(migrate_legacy_key(&old)).or_insert(false);
                        *entry = *entry || value;
                        migrated += 1;
                    }
                }
            }
        }
        migrated
    }

    /// Write onto `self` every `month` date whose flags differ between
    /// `base` and `edited`, for every user. Dates edited back to nothing are
    /// removed. Other months and unchanged dates are left as `self` has them.
    /// Returns the number of dates written.
    pub fn apply_month_changes(&mut self, month: YearMonth, base: &Self, edited: &Self) -> usize {
        let users: BTreeSet<&UserId> = base.users.keys().chain(edited.users.keys()).collect();
        let mut written = 0;
        for user in users {
            let before = base.month_of(user, month);
            let after = edited.month_of(user, month);
            let dates: BTreeSet<NaiveDate> = before
                .into_iter()
                .chain(after)
                .flat_map(|dates| dates.keys().copied())
                .collect();
            for date in dates {
                let new = after.and_then(|dates| dates.get(&date));
                if before.and_then(|dates| dates.get(&date)) == new {
                    continue;
                }
                self.replace_date(user, date, new.cloned().unwrap_or_default());
                written += 1;
            }
        }
        written
    }

    fn replace_date(&mut self, user: &UserId, date: NaiveDate, mut flags: DateFlags) {
        let month = YearMonth::of(date);
        flags.retain(|_, value| *value);
        if !flags.is_empty() {
            self.users
                .entry(user.clone())
                .or_default()
                .entry(month)
                .or_default()
                .insert(date, flags);
            return;
        }

        let Some(months) = self.users.get_mut(user) else { return };
        if let Some(dates) = months.get_mut(&month) {
            dates.remove(&date);
            if dates.is_empty() {
                months.remove(&month);
            }
        }
        if months.is_empty() {
            self.users.remove(user);
        }
    }
}
