//! Reusable dashboard widgets.

pub mod charts;
pub mod header;
pub mod heatmap;
