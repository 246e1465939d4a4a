//! Terminal UI layer for the bike-sharing dashboard.
//!
//! Provides themes, chart and table widgets, the four tab views, a plain-text
//! report and the main application event loop built on top of [`ratatui`].

pub mod app;
pub mod components;
pub mod narrative;
pub mod report;
pub mod table_view;
pub mod themes;
pub mod views;

#[cfg(test)]
mod test_support;

pub use bikeshare_core as core;
