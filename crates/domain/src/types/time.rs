//! Canonical slot time (`HH:MM`, zero-padded, 24-hour)

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::utils::time_parser::{self, MAX_HOUR, MAX_MINUTE};
use crate::RosterError;

/// Time of day of an event, always kept in canonical `HH:MM` form.
///
/// Ordering follows the clock, which is also the lexicographic order of the
/// canonical string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SlotTime {
    hour: u8,
    minute: u8,
}

impl SlotTime {
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// Build a time, clamping hour to `0..=23` and minute to `0..=59`.
    pub const fn new(hour: u32, minute: u32) -> Self {
        let hour = if hour > MAX_HOUR { MAX_HOUR } else { hour };
        let minute = if minute > MAX_MINUTE { MAX_MINUTE } else { minute };
        // both values are clamped below 60
        Self { hour: hour as u8, minute: minute as u8 }
    }

    /// Normalize free-form entry (`6h30`, `0630`, `6.30`). Never fails.
    pub fn normalize(raw: &str) -> Self {
        let (hour, minute) = time_parser::parse_loose_time(raw);
        Self::new(hour, minute)
    }

    /// Strict parse of the canonical `HH:MM` shape.
    pub fn parse_canonical(raw: &str) -> Option<Self> {
        if !time_parser::is_canonical_shape(raw) {
            return None;
        }
        let hour = raw[..2].parse::<u32>().ok()?;
        let minute = raw[3..].parse::<u32>().ok()?;
        (hour <= MAX_HOUR && minute <= MAX_MINUTE).then(|| Self::new(hour, minute))
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for SlotTime {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_canonical(s)
            .ok_or_else(|| RosterError::InvalidInput(format!("not a canonical HH:MM time: {s}")))
    }
}

impl Serialize for SlotTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Stored times are repaired rather than rejected: anything that is not
/// already canonical goes through [`SlotTime::normalize`].
impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer).map_err(D::Error::custom)?;
        Ok(Self::parse_canonical(&raw).unwrap_or_else(|| Self::normalize(&raw)))
    }
}
