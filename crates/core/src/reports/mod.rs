//! Shortage reports, selection tallies and event rosters

pub mod service;

pub use service::{rosters, shortages, tally, ReportService};
