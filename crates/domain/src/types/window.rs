//! Availability edit window settings

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use super::month::YearMonth;
use crate::constants::DEFAULT_AUTO_DAYS_BEFORE_END;

/// How the window is decided when a month has no override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowMode {
    /// Open for the last N days of the month before and day 1 of the month
    #[default]
    Auto,
    /// Open exactly when an administrator says so
    Manual,
}

crate::impl_keyword_conversions!(WindowMode {
    Auto => "auto",
    Manual => "manual",
});

/// Explicit date range for one month. A missing bound is unbounded; so is
/// a stored bound that is blank or not a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonthOverride {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub to: Option<NaiveDate>,
}

impl MonthOverride {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// An override without either bound does not take effect.
    pub fn is_set(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    pub fn contains(&self, today: NaiveDate) -> bool {
        self.from.map_or(true, |from| from <= today) && self.to.map_or(true, |to| today <= to)
    }
}

/// Window configuration, a single persisted record.
///
/// Each field decodes on its own: a field that is null or malformed takes
/// its default without discarding the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditWindowSettings {
    #[serde(default, deserialize_with = "or_default")]
    pub mode: WindowMode,
    #[serde(default, deserialize_with = "or_default")]
    pub manual_open: bool,
    #[serde(default = "default_auto_days", deserialize_with = "lenient_days")]
    pub auto_days_before_end: i64,
    #[serde(default, alias = "customByMonth", deserialize_with = "lenient_overrides")]
    pub overrides_by_month: BTreeMap<YearMonth, MonthOverride>,
}

impl Default for EditWindowSettings {
    fn default() -> Self {
        Self::with_auto_days(DEFAULT_AUTO_DAYS_BEFORE_END)
    }
}

impl EditWindowSettings {
    /// Defaults with a different auto window length.
    pub fn with_auto_days(days: i64) -> Self {
        Self {
            mode: WindowMode::Auto,
            manual_open: false,
            auto_days_before_end: days,
            overrides_by_month: BTreeMap::new(),
        }
    }

    /// Auto window length actually applied, never below one day.
    pub fn effective_auto_days(&self) -> u32 {
        u32::try_from(self.auto_days_before_end.max(1)).unwrap_or(u32::MAX)
    }

    /// Override for `month` if one with at least one bound exists.
    pub fn override_for(&self, month: YearMonth) -> Option<&MonthOverride> {
        self.overrides_by_month.get(&month).filter(|o| o.is_set())
    }

    pub fn set_override(
        &mut self,
        month: YearMonth,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) {
        let value = MonthOverride::new(from, to);
        if value.is_set() {
            self.overrides_by_month.insert(month, value);
        } else {
            self.overrides_by_month.remove(&month);
        }
    }

    pub fn clear_override(&mut self, month: YearMonth) -> bool {
        self.overrides_by_month.remove(&month).is_some()
    }

    /// Bring the record back within its invariants before saving.
    pub fn sanitize(&mut self) {
        self.auto_days_before_end = self.auto_days_before_end.max(1);
        self.overrides_by_month.retain(|_, o| o.is_set());
    }
}

fn default_auto_days() -> i64 {
    DEFAULT_AUTO_DAYS_BEFORE_END
}

/// A value of type `T`, or anything else.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Value(T),
    Other(IgnoredAny),
}

impl<T> Lenient<T> {
    fn into_option(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Other(_) => None,
        }
    }
}

/// Decode `T`, falling back to its default on null or a value of the wrong
/// shape.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Lenient::<T>::deserialize(deserializer)?.into_option().unwrap_or_default())
}

/// Keep the overrides whose month key and range both decode.
fn lenient_overrides<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<YearMonth, MonthOverride>, D::Error> {
    let raw: BTreeMap<String, Lenient<MonthOverride>> = or_default(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(month, value)| Some((month.parse().ok()?, value.into_option()?)))
        .collect())
}

/// Accept integers, fractional numbers (floored) and numeric strings.
/// Anything else, null included, is the default.
fn lenient_days<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Days {
        Int(i64),
        Float(f64),
        Text(String),
        Other(IgnoredAny),
    }

    let days = match Days::deserialize(deserializer)? {
        Days::Int(n) => n,
        // saturating float-to-int cast
        Days::Float(f) if f.is_finite() => f.floor() as i64,
        Days::Float(_) => DEFAULT_AUTO_DAYS_BEFORE_END,
        Days::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()).map_or(
            DEFAULT_AUTO_DAYS_BEFORE_END,
            |f| f.floor() as i64,
        ),
        Days::Other(_) => DEFAULT_AUTO_DAYS_BEFORE_END,
    };
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = EditWindowSettings::default();
        assert_eq!(settings.mode, WindowMode::Auto);
        assert!(!settings.manual_open);
        assert_eq!(settings.auto_days_before_end, 10);
        assert!(settings.overrides_by_month.is_empty());
    }

    #[test]
    fn test_effective_days_never_below_one() {
        let mut settings = EditWindowSettings::with_auto_days(0);
        assert_eq!(settings.effective_auto_days(), 1);
        settings.auto_days_before_end = -5;
        assert_eq!(settings.effective_auto_days(), 1);
        settings.sanitize();
        assert_eq!(settings.auto_days_before_end, 1);
    }

    #[test]
    fn test_reads_stored_record_with_old_field_name() {
        let json = r#"{
            "mode": "manual",
            "manualOpen": true,
            "autoDaysBeforeEnd": 7.9,
            "customByMonth": { "2025-05": { "from": "2025-04-20" } }
        }"#;
        let settings: EditWindowSettings = serde_json::from_str(json).unwrap();
        let may = YearMonth::new(2025, 5).unwrap();

        assert_eq!(settings.mode, WindowMode::Manual);
        assert!(settings.manual_open);
        assert_eq!(settings.auto_days_before_end, 7);
        assert_eq!(settings.override_for(may).and_then(|o| o.from), Some(date(2025, 4, 20)));
    }

    #[test]
    fn test_bad_fields_fall_back_one_by_one() {
        let json = r#"{
            "mode": "manual",
            "manualOpen": null,
            "autoDaysBeforeEnd": null,
            "customByMonth": {
                "2025-05": { "from": "", "to": "2025-05-03" },
                "2025-06": { "from": "someday" },
                "2025-07": "never",
                "later": { "from": "2025-04-20" }
            }
        }"#;
        let settings: EditWindowSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.mode, WindowMode::Manual);
        assert!(!settings.manual_open);
        assert_eq!(settings.auto_days_before_end, 10);

        let may = settings.override_for(YearMonth::new(2025, 5).unwrap()).unwrap();
        assert_eq!((may.from, may.to), (None, Some(date(2025, 5, 3))));
        // an override left without bounds is stored but takes no effect
        assert!(settings.override_for(YearMonth::new(2025, 6).unwrap()).is_none());
        assert_eq!(settings.overrides_by_month.len(), 2);
    }

    #[test]
    fn test_unknown_mode_reads_as_auto() {
        let json = r#"{ "mode": "weekly", "manualOpen": true }"#;
        let settings: EditWindowSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.mode, WindowMode::Auto);
        assert!(settings.manual_open);
    }

    #[test]
    fn test_empty_override_is_ignored_and_not_stored() {
        let may = YearMonth::new(2025, 5).unwrap();
        let mut settings = EditWindowSettings::default();
        settings.overrides_by_month.insert(may, MonthOverride::default());
        assert!(settings.override_for(may).is_none());

        settings.set_override(may, None, None);
        assert!(settings.overrides_by_month.is_empty());

        settings.set_override(may, None, Some(date(2025, 5, 3)));
        assert!(settings.override_for(may).is_some());
        assert!(settings.clear_override(may));
    }

    #[test]
    fn test_override_bounds_are_inclusive() {
        let window = MonthOverride::new(Some(date(2025, 4, 20)), Some(date(2025, 4, 25)));
        assert!(!window.contains(date(2025, 4, 19)));
        assert!(window.contains(date(2025, 4, 20)));
        assert!(window.contains(date(2025, 4, 25)));
        assert!(!window.contains(date(2025, 4, 26)));
        assert!(MonthOverride::new(None, Some(date(2025, 4, 25))).contains(date(1999, 1, 1)));
    }
}
