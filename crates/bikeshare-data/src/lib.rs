//! Data layer for the bike-sharing dashboard.
//!
//! Reads the daily and hourly CSV files, aggregates rentals per weekday and
//! per hour of day, and runs the top-level analysis pipeline consumed by the
//! UI.

pub mod aggregator;
pub mod analysis;
pub mod reader;

pub use bikeshare_core as core;
