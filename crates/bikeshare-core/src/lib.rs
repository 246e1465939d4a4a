//! Domain layer for the bike-sharing dashboard.
//!
//! Typed daily and hourly records, the weekday recency/frequency/monetary
//! aggregate, descriptive statistics, number formatting, date normalization,
//! the error type and command-line settings shared by every other crate.

pub mod dates;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod stats;
