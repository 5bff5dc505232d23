//! Wiring of storage, repositories and engine services
//!
//! [`RosterContext::open`] is the single entry point a host needs: it opens
//! the configured backend, runs pending schema upgrades, and hands out the
//! engine services over shared repository handles.

use std::sync::Arc;

use roster_core::{
    AvailabilityRepository, AvailabilityStore, CalendarBuilder, CalendarRepository, Clock,
    ExtraEventEditor, ExtraEventRepository, MigrationReport, MigrationStores, ReportService,
    SchemaMigrator, SchemaRepository, SlotRegistry, SlotRepository, WindowSettingsRepository,
    WindowSettingsService,
};
use roster_domain::{Config, Result, YearMonth};
use tracing::{info, instrument};

use crate::clock::SystemClock;
use crate::repositories::{
    KvAvailabilityRepository, KvCalendarRepository, KvExtraEventRepository, KvSchemaRepository,
    KvSlotRepository, KvWindowSettingsRepository,
};
use crate::storage::{self, KvStore};

/// Shared handles for one roster store.
pub struct RosterContext {
    slots: Arc<dyn SlotRepository>,
    extras: Arc<dyn ExtraEventRepository>,
    availability: Arc<dyn AvailabilityRepository>,
    window_settings: Arc<dyn WindowSettingsRepository>,
    builder: Arc<CalendarBuilder>,
    clock: Arc<dyn Clock>,
    default_auto_days: i64,
    migration: MigrationReport,
}

impl RosterContext {
    /// Open the configured backend with the system clock.
    pub fn open(config: &Config) -> Result<Self> {
        let store = storage::open_store(&config.storage)?;
        Self::with_store(config, store, Arc::new(SystemClock))
    }

    /// Wire the engine over an existing store and clock, then migrate.
    #[instrument(skip_all, fields(backend = %config.storage.backend))]
    pub fn with_store(
        config: &Config,
        store: Arc<dyn KvStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let schema: Arc<dyn SchemaRepository> = Arc::new(KvSchemaRepository::new(store.clone()));
        let slots: Arc<dyn SlotRepository> = Arc::new(KvSlotRepository::new(store.clone()));
        let extras: Arc<dyn ExtraEventRepository> =
            Arc::new(KvExtraEventRepository::new(store.clone()));
        let calendars: Arc<dyn CalendarRepository> =
            Arc::new(KvCalendarRepository::new(store.clone()));
        let availability: Arc<dyn AvailabilityRepository> =
            Arc::new(KvAvailabilityRepository::new(store.clone()));
        let window_settings: Arc<dyn WindowSettingsRepository> =
            Arc::new(KvWindowSettingsRepository::new(store));

        let migration = SchemaMigrator::new(
            MigrationStores {
                schema,
                slots: slots.clone(),
                extras: extras.clone(),
                calendars: calendars.clone(),
                availability: availability.clone(),
            },
            config.roster.seed_default_slots,
        )
        .run()?;

        let builder = Arc::new(CalendarBuilder::new(
            slots.clone(),
            extras.clone(),
            calendars,
            availability.clone(),
        ));

        info!(schema_version = migration.to_version, "Roster store ready");
        Ok(Self {
            slots,
            extras,
            availability,
            window_settings,
            builder,
            clock,
            default_auto_days: config.roster.default_auto_days_before_end,
            migration,
        })
    }

    /// What the schema migration changed when this context was opened.
    pub fn migration(&self) -> &MigrationReport {
        &self.migration
    }

    pub fn builder(&self) -> Arc<CalendarBuilder> {
        self.builder.clone()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    pub fn reports(&self) -> ReportService {
        ReportService::new(self.builder.clone(), self.availability.clone())
    }

    pub fn slot_registry(&self) -> SlotRegistry {
        SlotRegistry::new(self.slots.clone())
    }

    pub fn window_settings(&self) -> WindowSettingsService {
        WindowSettingsService::new(self.window_settings.clone(), self.default_auto_days)
    }

    /// Start an extra event editing session over the stored registry.
    pub fn extra_editor(&self) -> Result<ExtraEventEditor> {
        ExtraEventEditor::open(self.extras.clone(), self.builder.clone())
    }

    /// Rebuild `month` and open an availability editing session gated by
    /// the current window settings.
    pub fn availability_store(&self, month: YearMonth) -> Result<AvailabilityStore> {
        let calendar = self.builder.build_month(month)?;
        let gate = self.window_settings().gate(self.clock.clone())?;
        AvailabilityStore::open(self.availability.clone(), calendar, gate)
    }

    /// Month the shortage report should cover today.
    pub fn report_month(&self) -> Result<YearMonth> {
        let settings = self.window_settings().load()?;
        Ok(roster_core::window::report_month(&settings, self.clock.today()))
    }
}
