//! Free-form time entry normalization.
//!
//! Administrators type slot times by hand, so the registry has to accept the
//! spellings people actually use (`6h30`, `06:30`, `0630`, `6.30`) and turn
//! them into the canonical zero-padded `HH:MM` form. Parsing never fails:
//! whatever cannot be read falls back to midnight, and out-of-range
//! components are clamped rather than rejected.

use once_cell::sync::Lazy;
use regex::Regex;

/// `6:30`, `06.30`, `6h30` (after `h` is rewritten to `:`)
static SEPARATED: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^(\d{1,2})[:.](\d{2})$").ok());

/// `0630`
static COMPACT: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^(\d{2})(\d{2})$").ok());

/// Highest representable hour.
pub const MAX_HOUR: u32 = 23;
/// Highest representable minute.
pub const MAX_MINUTE: u32 = 59;

/// Parse a loosely formatted time into clamped `(hour, minute)` components.
///
/// Unrecognized input yields `(0, 0)`.
pub fn parse_loose_time(raw: &str) -> (u32, u32) {
    let cleaned = raw.trim().to_lowercase().replace('h', ":");

    let captured = [&*SEPARATED, &*COMPACT]
        .into_iter()
        .flatten()
        .find_map(|pattern| pattern.captures(&cleaned))
        .map(|caps| (component(caps.get(1)), component(caps.get(2))));

    let (hour, minute) = captured.unwrap_or((0, 0));
    (hour.min(MAX_HOUR), minute.min(MAX_MINUTE))
}

fn component(m: Option<regex::Match<'_>>) -> u32 {
    m.and_then(|m| m.as_str().parse::<u32>().ok()).unwrap_or(0)
}

/// Returns true when `raw` is already exactly `HH:MM` with two digits each.
pub fn is_canonical_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 5
        && bytes[2] == b':'
        && bytes[..2].iter().all(u8::is_ascii_digit)
        && bytes[3..].iter().all(u8::is_ascii_digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_spellings() {
        assert_eq!(parse_loose_time("06:30"), (6, 30));
        assert_eq!(parse_loose_time("6h30"), (6, 30));
        assert_eq!(parse_loose_time("6H30"), (6, 30));
        assert_eq!(parse_loose_time("0630"), (6, 30));
        assert_eq!(parse_loose_time("6.30"), (6, 30));
        assert_eq!(parse_loose_time("  19:00 "), (19, 0));
    }

    #[test]
    fn test_clamps_out_of_range_components() {
        assert_eq!(parse_loose_time("27:75"), (23, 59));
        assert_eq!(parse_loose_time("9960"), (23, 59));
    }

    #[test]
    fn test_unreadable_input_is_midnight() {
        assert_eq!(parse_loose_time(""), (0, 0));
        assert_eq!(parse_loose_time("630"), (0, 0));
        assert_eq!(parse_loose_time("noon"), (0, 0));
        assert_eq!(parse_loose_time("6:3"), (0, 0));
    }

    #[test]
    fn test_canonical_shape() {
        assert!(is_canonical_shape("06:30"));
        assert!(!is_canonical_shape("6:30"));
        assert!(!is_canonical_shape("F|06:30"));
        assert!(!is_canonical_shape("06-30"));
    }
}
