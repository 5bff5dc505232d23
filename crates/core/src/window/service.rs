//! Maintenance of the window settings record

use std::sync::Arc;

use chrono::NaiveDate;
use roster_domain::{EditWindowSettings, Result, WindowMode, YearMonth};
use tracing::info;

use super::policy::EditGate;
use super::ports::{Clock, WindowSettingsRepository};

/// Reads and updates the window settings, falling back to defaults when no
/// record was ever saved.
pub struct WindowSettingsService {
    repository: Arc<dyn WindowSettingsRepository>,
    default_auto_days: i64,
}

impl WindowSettingsService {
    pub fn new(repository: Arc<dyn WindowSettingsRepository>, default_auto_days: i64) -> Self {
        Self { repository, default_auto_days }
    }

    /// Stored settings, or the defaults.
    pub fn load(&self) -> Result<EditWindowSettings> {
        Ok(self
            .repository
            .load_settings()?
            .unwrap_or_else(|| EditWindowSettings::with_auto_days(self.default_auto_days)))
    }

    /// Save after clamping the auto window to at least one day.
    pub fn save(&self, mut settings: EditWindowSettings) -> Result<EditWindowSettings> {
        settings.sanitize();
        self.repository.save_settings(&settings)?;
        info!(
            mode = %settings.mode,
            manual_open = settings.manual_open,
            auto_days = settings.auto_days_before_end,
            overrides = settings.overrides_by_month.len(),
            "Saved edit window settings"
        );
        Ok(settings)
    }

    pub fn set_mode(&self, mode: WindowMode) -> Result<EditWindowSettings> {
        self.update(|s| s.mode = mode)
    }

    pub fn set_manual_open(&self, open: bool) -> Result<EditWindowSettings> {
        self.update(|s| s.manual_open = open)
    }

    pub fn set_auto_days(&self, days: i64) -> Result<EditWindowSettings> {
        self.update(|s| s.auto_days_before_end = days)
    }

    /// Set the override for `month`; passing no bounds removes it.
    pub fn set_override(
        &self,
        month: YearMonth,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<EditWindowSettings> {
        self.update(|s| s.set_override(month, from, to))
    }

    pub fn clear_override(&self, month: YearMonth) -> Result<EditWindowSettings> {
        self.update(|s| {
            s.clear_override(month);
        })
    }

    /// Gate over the current settings evaluated against `clock`.
    pub fn gate(&self, clock: Arc<dyn Clock>) -> Result<EditGate> {
        Ok(EditGate::new(self.load()?, clock))
    }

    fn update<F: FnOnce(&mut EditWindowSettings)>(&self, change: F) -> Result<EditWindowSettings> {
        let mut settings = self.load()?;
        change(&mut settings);
        self.save(settings)
    }
}
