//! Schema-gated upgrades of stored records
//!
//! | from | step |
//! |------|------|
//! | < 2 | replace the slot list with the default schedule |
//! | < 3 | purge retired fixed times; rewrite legacy availability keys |
//!
//! Independently of the version, an empty slot list is seeded with the
//! default schedule when seeding is enabled.

use std::sync::Arc;

use roster_domain::constants::{
    CURRENT_SCHEMA_VERSION, RETIRED_FIXED_TIMES, SLOT_RESEED_SCHEMA_VERSION,
};
use roster_domain::{EventKey, MonthCalendar, Result, SlotTime, TimeSlot};
use serde::Serialize;
use tracing::{debug, info};

use super::ports::SchemaRepository;
use crate::availability::ports::AvailabilityRepository;
use crate::calendar::ports::{CalendarRepository, ExtraEventRepository, SlotRepository};

/// What a migration run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub from_version: u32,
    pub to_version: u32,
    pub reseeded_slots: bool,
    pub seeded_empty_slots: bool,
    pub purged_slots: usize,
    pub purged_extras: usize,
    pub purged_calendar_events: usize,
    pub purged_availability_keys: usize,
    pub migrated_legacy_keys: usize,
}

impl MigrationReport {
    pub fn changed_anything(&self) -> bool {
        self.from_version != self.to_version
            || self.reseeded_slots
            || self.seeded_empty_slots
            || self.purged_slots > 0
            || self.purged_extras > 0
            || self.purged_calendar_events > 0
            || self.purged_availability_keys > 0
            || self.migrated_legacy_keys > 0
    }
}

/// Stores the migrator rewrites.
pub struct MigrationStores {
    pub schema: Arc<dyn SchemaRepository>,
    pub slots: Arc<dyn SlotRepository>,
    pub extras: Arc<dyn ExtraEventRepository>,
    pub calendars: Arc<dyn CalendarRepository>,
    pub availability: Arc<dyn AvailabilityRepository>,
}

/// Runs pending upgrades at store load.
pub struct SchemaMigrator {
    stores: MigrationStores,
    seed_default_slots: bool,
}

fn is_retired(time: SlotTime) -> bool {
    let text = time.to_string();
    RETIRED_FIXED_TIMES.contains(&text.as_str())
}

impl SchemaMigrator {
    pub fn new(stores: MigrationStores, seed_default_slots: bool) -> Self {
        Self { stores, seed_default_slots }
    }

    /// Bring stored records up to the current schema version.
    pub fn run(&self) -> Result<MigrationReport> {
        let from_version = self.stores.schema.schema_version()?;
        let mut report = MigrationReport {
            from_version,
            to_version: from_version.max(CURRENT_SCHEMA_VERSION),
            ..Default::default()
        };

        if from_version < SLOT_RESEED_SCHEMA_VERSION {
            self.stores.slots.save_slots(&TimeSlot::default_seed())?;
            report.reseeded_slots = true;
            info!(from_version, "Reseeded slots with the default schedule");
        }

        if from_version < CURRENT_SCHEMA_VERSION {
            self.purge_retired_times(&mut report)?;
            self.migrate_legacy_keys(&mut report)?;
        }

        if self.seed_default_slots && self.stores.slots.load_slots()?.is_empty() {
            self.stores.slots.save_slots(&TimeSlot::default_seed())?;
            report.seeded_empty_slots = true;
            info!("Seeded empty slot registry with the default schedule");
        }

        if report.to_version != from_version {
            self.stores.schema.set_schema_version(report.to_version)?;
        }

        if report.changed_anything() {
            info!(
                from_version,
                to_version = report.to_version,
                purged_slots = report.purged_slots,
                purged_extras = report.purged_extras,
                purged_keys = report.purged_availability_keys,
                migrated_keys = report.migrated_legacy_keys,
                "Migrated stored records"
            );
        } else {
            debug!(version = from_version, "Stored records are current");
        }
        Ok(report)
    }

    fn purge_retired_times(&self, report: &mut MigrationReport) -> Result<()> {
        let mut slots = self.stores.slots.load_slots()?;
        let before = slots.len();
        slots.retain(|s| !is_retired(s.time));
        report.purged_slots = before - slots.len();
        if report.purged_slots > 0 {
            self.stores.slots.save_slots(&slots)?;
        }

        let mut extras = self.stores.extras.load_extras()?;
        for list in extras.values_mut() {
            let before = list.len();
            list.retain(|e| !is_retired(e.time));
            report.purged_extras += before - list.len();
        }
        if report.purged_extras > 0 {
            self.stores.extras.save_extras(&extras)?;
        }

        for month in self.stores.calendars.cached_months()? {
            let Some(calendar) = self.stores.calendars.load_month(month)? else { continue };
            let before = calendar.event_count();
            let mut days = calendar.into_days();
            for events in days.values_mut() {
                events.retain(|ev| !is_retired(ev.time));
            }
            let purged = MonthCalendar::from_days(month, days);
            let removed = before - purged.event_count();
            if removed > 0 {
                self.stores.calendars.save_month(&purged)?;
                report.purged_calendar_events += removed;
            }
        }

        let mut book = self.stores.availability.load_availability()?;
        report.purged_availability_keys =
            book.retain_all(|_, key| !EventKey::parse(key).is_some_and(|k| is_retired(k.time())));
        if report.purged_availability_keys > 0 {
            self.stores.availability.save_availability(&book)?;
        }
        Ok(())
    }

    fn migrate_legacy_keys(&self, report: &mut MigrationReport) -> Result<()> {
        let mut book = self.stores.availability.load_availability()?;
        report.migrated_legacy_keys = book.migrate_legacy_keys();
        if report.migrated_legacy_keys > 0 {
            self.stores.availability.save_availability(&book)?;
        }
        Ok(())
    }
}
