//! Recurring weekly time slots

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::time::SlotTime;
use crate::constants::{DEFAULT_MAX_STAFF, DEFAULT_MIN_STAFF};
use crate::utils::dates::{weekday_index, weekday_serde};

/// A recurring weekly slot. Unique by `(weekday, time)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    #[serde(with = "weekday_serde", alias = "dow")]
    pub weekday: Weekday,
    pub time: SlotTime,
    #[serde(default, alias = "min")]
    pub min_staff: u32,
    #[serde(default, alias = "max")]
    pub max_staff: u32,
    #[serde(default = "default_active", alias = "ativo")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl TimeSlot {
    /// Create an active slot. `max_staff` is raised to `min_staff` if lower.
    pub fn new(weekday: Weekday, time: SlotTime, min_staff: u32, max_staff: u32) -> Self {
        Self { weekday, time, min_staff, max_staff: max_staff.max(min_staff), active: true }
    }

    /// Registry identifier, e.g. `"1-06:30"` for Monday 06:30.
    pub fn id(&self) -> String {
        slot_id(self.weekday, self.time)
    }

    /// Whether this slot occupies the given `(weekday, time)` position.
    pub fn occupies(&self, weekday: Weekday, time: SlotTime) -> bool {
        self.weekday == weekday && self.time == time
    }

    /// Keep `max_staff >= min_staff`.
    pub fn clamp_staffing(&mut self) {
        self.max_staff = self.max_staff.max(self.min_staff);
    }

    /// The parish's standing weekly schedule.
    ///
    /// Weekdays 06:30, 11:30 and 19:00; Saturday 06:30 and 19:00; Sunday
    /// 06:30, 08:30, 11:00 and 19:00.
    pub fn default_seed() -> Vec<Self> {
        const WEEKDAY_TIMES: [(u32, u32); 3] = [(6, 30), (11, 30), (19, 0)];
        const SATURDAY_TIMES: [(u32, u32); 2] = [(6, 30), (19, 0)];
        const SUNDAY_TIMES: [(u32, u32); 4] = [(6, 30), (8, 30), (11, 0), (19, 0)];

        let weekdays = [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri];
        let seed = |weekday: Weekday, (h, m): (u32, u32)| {
            Self::new(weekday, SlotTime::new(h, m), DEFAULT_MIN_STAFF, DEFAULT_MAX_STAFF)
        };

        let mut slots: Vec<Self> = weekdays
            .iter()
            .flat_map(|&day| WEEKDAY_TIMES.iter().map(move |&hm| seed(day, hm)))
            .collect();
        slots.extend(SATURDAY_TIMES.iter().map(|&hm| seed(Weekday::Sat, hm)));
        slots.extend(SUNDAY_TIMES.iter().map(|&hm| seed(Weekday::Sun, hm)));
        slots
    }
}

/// Registry identifier for a `(weekday, time)` position.
pub fn slot_id(weekday: Weekday, time: SlotTime) -> String {
    format!("{}-{}", weekday_index(weekday), time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_uses_sunday_first_index() {
        let slot = TimeSlot::new(Weekday::Mon, SlotTime::new(6, 30), 4, 12);
        assert_eq!(slot.id(), "1-06:30");
        let sunday = TimeSlot::new(Weekday::Sun, SlotTime::new(19, 0), 4, 12);
        assert_eq!(sunday.id(), "0-19:00");
    }

    #[test]
    fn test_new_raises_max_to_min() {
        let slot = TimeSlot::new(Weekday::Mon, SlotTime::new(6, 30), 8, 3);
        assert_eq!(slot.max_staff, 8);
    }

    #[test]
    fn test_default_seed_shape() {
        let seed = TimeSlot::default_seed();
        assert_eq!(seed.len(), 5 * 3 + 2 + 4);
        assert!(seed.iter().all(|s| s.active && s.min_staff == 4 && s.max_staff == 12));

        let mut ids: Vec<String> = seed.iter().map(TimeSlot::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), seed.len(), "seed must not contain duplicate positions");
        assert!(seed.iter().all(|s| s.time.to_string() != "18:30"));
    }

    #[test]
    fn test_serialized_shape() {
        let slot = TimeSlot::new(Weekday::Sat, SlotTime::new(19, 0), 4, 12);
        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "weekday": 6,
                "time": "19:00",
                "minStaff": 4,
                "maxStaff": 12,
                "active": true
            })
        );
    }

    #[test]
    fn test_reads_legacy_field_names() {
        let json = r#"{"dow":1,"time":"6h30","min":2,"max":5,"ativo":false}"#;
        let slot: TimeSlot = serde_json::from_str(json).unwrap();
        assert_eq!(slot.weekday, Weekday::Mon);
        assert_eq!(slot.time, SlotTime::new(6, 30));
        assert_eq!((slot.min_staff, slot.max_staff), (2, 5));
        assert!(!slot.active);
    }
}
