//! Event identity keys
//!
//! Availability is recorded against a key string rather than against the slot
//! or extra definition, so edits to those definitions do not orphan records
//! that still describe the same occurrence.
//!
//! | event | key |
//! |-------|-----|
//! | fixed | `F\|HH:MM` |
//! | extra | `X\|HH:MM\|<name>` |
//! | legacy fixed | `HH:MM` |
//!
//! A legacy bare-time key is permanently equivalent to its `F|HH:MM` form.

use std::fmt;

use super::time::SlotTime;
use crate::constants::{EXTRA_KEY_TAG, FIXED_KEY_TAG, KEY_SEPARATOR};
use crate::utils::time_parser::is_canonical_shape;

/// Parsed identity of an event within a date.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKey {
    Fixed { time: SlotTime },
    Extra { time: SlotTime, name: String },
}

impl EventKey {
    pub fn fixed(time: SlotTime) -> Self {
        Self::Fixed { time }
    }

    pub fn extra(time: SlotTime, name: impl Into<String>) -> Self {
        Self::Extra { time, name: name.into() }
    }

    pub fn time(&self) -> SlotTime {
        match self {
            Self::Fixed { time } | Self::Extra { time, .. } => *time,
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed { .. })
    }

    /// Canonical string form, as written by new availability records.
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    /// The bare-time spelling older records used for this key, if any.
    pub fn legacy_alias(&self) -> Option<String> {
        match self {
            Self::Fixed { time } => Some(time.to_string()),
            Self::Extra { .. } => None,
        }
    }

    /// Every stored spelling that means this event.
    pub fn spellings(&self) -> impl Iterator<Item = String> {
        std::iter::once(self.canonical()).chain(self.legacy_alias())
    }

    /// Parse a stored key; bare `HH:MM` reads as a fixed key.
    pub fn parse(raw: &str) -> Option<Self> {
        if is_legacy_key(raw) {
            return SlotTime::parse_canonical(raw).map(Self::fixed);
        }

        let mut parts = raw.splitn(3, KEY_SEPARATOR);
        let tag = parts.next()?;
        let time = SlotTime::parse_canonical(parts.next()?)?;
        match (tag, parts.next()) {
            (FIXED_KEY_TAG, None) => Some(Self::fixed(time)),
            (EXTRA_KEY_TAG, Some(name)) => Some(Self::extra(time, name)),
            _ => None,
        }
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed { time } => write!(f, "{FIXED_KEY_TAG}{KEY_SEPARATOR}{time}"),
            Self::Extra { time, name } => {
                write!(f, "{EXTRA_KEY_TAG}{KEY_SEPARATOR}{time}{KEY_SEPARATOR}{name}")
            }
        }
    }
}

/// A bare `HH:MM` key written before keys carried a kind tag.
pub fn is_legacy_key(raw: &str) -> bool {
    is_canonical_shape(raw)
}

/// Rewrite a legacy bare-time key to `F|HH:MM`; other keys pass through.
pub fn migrate_legacy_key(raw: &str) -> String {
    if is_legacy_key(raw) {
        format!("{FIXED_KEY_TAG}{KEY_SEPARATOR}{raw}")
    } else {
        raw.to_string()
    }
}
