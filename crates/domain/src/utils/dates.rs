//! Weekday numbering helpers.
//!
//! Persisted records number weekdays Sunday-first (`0` = Sunday ... `6` =
//! Saturday). Inside the engine we use [`chrono::Weekday`].

use chrono::Weekday;

/// Sunday-first index of a weekday (`0..=6`).
pub fn weekday_index(weekday: Weekday) -> u8 {
    // num_days_from_sunday is always < 7
    u8::try_from(weekday.num_days_from_sunday()).unwrap_or(0)
}

/// Weekday for a Sunday-first index, `None` outside `0..=6`.
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Serde adapter storing a [`Weekday`] as its Sunday-first index.
pub mod weekday_serde {
    use chrono::Weekday;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(super::weekday_index(*weekday))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let index = u8::deserialize(deserializer)?;
        super::weekday_from_index(index)
            .ok_or_else(|| D::Error::custom(format!("weekday index out of range: {index}")))
    }
}
