//! Domain utilities: time entry normalization and weekday numbering.

pub mod dates;
pub mod time_parser;

pub use dates::{weekday_from_index, weekday_index};
pub use time_parser::parse_loose_time;
