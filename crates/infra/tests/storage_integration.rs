//! Integration tests for the file-backed store and the bootstrap context
//!
//! Scenario: a parish store written by an older release (no schema version,
//! a retired 18:30 slot, legacy availability keys) is opened, migrated, and
//! then used for a full editing cycle that must survive a reopen.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use roster_core::{FixedClock, NewExtra, SlotRepository};
use roster_domain::{
    Actor, Config, EventKey, RosterError, SlotTime, StorageBackend, StorageConfig, UserId,
    YearMonth,
};
use roster_infra::storage::records::{AVAILABILITY_KEY, SCHEMA_VERSION_KEY, SLOTS_KEY};
use roster_infra::{FileKvStore, KvSlotRepository, KvStore, MemoryKvStore, RosterContext};
use serde_json::json;
use tempfile::TempDir;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn ym(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).unwrap()
}

fn file_config(dir: &TempDir) -> Config {
    Config {
        storage: StorageConfig {
            backend: StorageBackend::File,
            path: dir.path().join("store").display().to_string(),
        },
        ..Config::default()
    }
}

fn open_at(config: &Config, today: NaiveDate) -> RosterContext {
    let store: Arc<dyn KvStore> = Arc::new(FileKvStore::open(&config.storage.path).unwrap());
    RosterContext::with_store(config, store, Arc::new(FixedClock(today))).unwrap()
}

// ============================================================================
// Migration On Open
// ============================================================================

/// An unversioned store is reseeded and its legacy keys rewritten
#[test]
fn test_open_migrates_unversioned_store() {
    let dir = TempDir::new().unwrap();
    let config = file_config(&dir);
    let raw = FileKvStore::open(&config.storage.path).unwrap();
    raw.put(SLOTS_KEY, &json!([{ "dow": 1, "time": "18h30", "min": 4, "max": 12 }])).unwrap();
    raw.put(
        AVAILABILITY_KEY,
        &json!({
            "ana": { "2025-04": {
                "2025-04-07": { "06:30": true, "18:30": true, "F|11:30": false }
            } }
        }),
    )
    .unwrap();

    let context = open_at(&config, date(2025, 3, 25));

    let report = context.migration();
    assert!(report.reseeded_slots);
    assert_eq!(report.purged_availability_keys, 1);
    assert_eq!(report.migrated_legacy_keys, 1);
    assert_eq!(raw.get(SCHEMA_VERSION_KEY).unwrap(), Some(json!(3)));
    assert_eq!(
        raw.get(AVAILABILITY_KEY).unwrap(),
        Some(json!({ "ana": { "2025-04": { "2025-04-07": { "F|06:30": true } } } }))
    );

    let slots = KvSlotRepository::new(Arc::new(raw)).load_slots().unwrap();
    assert_eq!(slots.len(), 21);
}

/// A damaged schema version refuses to open instead of reseeding
#[test]
fn test_unreadable_schema_version_leaves_store_untouched() {
    let dir = TempDir::new().unwrap();
    let config = file_config(&dir);
    let raw = FileKvStore::open(&config.storage.path).unwrap();
    let slots = json!([{ "dow": 1, "time": "07:00", "min": 4, "max": 12 }]);
    raw.put(SCHEMA_VERSION_KEY, &json!("v3")).unwrap();
    raw.put(SLOTS_KEY, &slots).unwrap();

    let store: Arc<dyn KvStore> = Arc::new(FileKvStore::open(&config.storage.path).unwrap());
    let opened = RosterContext::with_store(&config, store, Arc::new(FixedClock(date(2025, 3, 25))));

    assert!(matches!(opened, Err(RosterError::Serialization(_))));
    assert_eq!(raw.get(SLOTS_KEY).unwrap(), Some(slots));
    assert_eq!(raw.get(SCHEMA_VERSION_KEY).unwrap(), Some(json!("v3")));
}

/// Reopening a current store changes nothing
#[test]
fn test_reopen_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let config = file_config(&dir);

    open_at(&config, date(2025, 3, 25));
    let second = open_at(&config, date(2025, 3, 25));

    assert!(!second.migration().changed_anything());
}

// ============================================================================
// Editing Cycle
// ============================================================================

/// Availability confirmed through one context is visible after reopening
#[test]
fn test_confirmed_availability_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let config = file_config(&dir);
    let today = date(2025, 3, 25);
    let ana = UserId::from("ana");
    let monday = EventKey::fixed(SlotTime::new(6, 30));

    {
        let context = open_at(&config, today);
        context
            .window_settings()
            .set_override(ym(2025, 4), Some(date(2025, 3, 20)), None)
            .unwrap();

        let mut store = context.availability_store(ym(2025, 4)).unwrap();
        let ana_volunteer = Actor::volunteer("ana");
        let dates =
            store.apply_recurrence(&ana_volunteer, &ana, Weekday::Mon, SlotTime::new(6, 30), true);
        assert_eq!(dates.len(), 4);
        store.confirm().unwrap();
    }

    let context = open_at(&config, today);
    let store = context.availability_store(ym(2025, 4)).unwrap();
    assert!(store.is_available(&ana, date(2025, 4, 14), &monday));
    assert_eq!(store.confirmed_count(date(2025, 4, 14), &monday), 1);

    let shortages = context.reports().shortage_report(ym(2025, 4)).unwrap();
    let monday_rows: Vec<_> = shortages
        .iter()
        .filter(|r| r.event.key() == monday && r.date.weekday() == Weekday::Mon)
        .collect();
    assert_eq!(monday_rows.len(), 4);
    assert!(monday_rows.iter().all(|r| r.confirmed == 1 && r.missing == 3));
}

/// Confirmed extras land in the calendar of their month
#[test]
fn test_extra_editor_rebuilds_calendar() {
    let config = Config::default();
    let clock = Arc::new(FixedClock(date(2025, 6, 1)));
    let context =
        RosterContext::with_store(&config, Arc::new(MemoryKvStore::new()), clock).unwrap();

    let mut editor = context.extra_editor().unwrap();
    editor.add(NewExtra::new(date(2025, 6, 19), "20h00", "Corpus Christi"));
    editor.confirm().unwrap();

    let calendar = context.builder().build_month(ym(2025, 6)).unwrap();
    let names: Vec<&str> =
        calendar.events_on(date(2025, 6, 19)).iter().map(|e| e.name_or_empty()).collect();
    assert!(names.contains(&"Corpus Christi"));
}

/// The report month follows the clock and the window settings
#[test]
fn test_report_month_uses_injected_clock() {
    let config = Config::default();
    let clock = Arc::new(FixedClock(date(2025, 3, 31)));
    let context =
        RosterContext::with_store(&config, Arc::new(MemoryKvStore::new()), clock).unwrap();

    // April's auto window opens late in April, so March is reported
    assert_eq!(context.report_month().unwrap(), ym(2025, 3));

    context.window_settings().set_override(ym(2025, 4), Some(date(2025, 3, 1)), None).unwrap();
    assert_eq!(context.report_month().unwrap(), ym(2025, 4));
}
