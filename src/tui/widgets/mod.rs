//! TUI widgets

pub mod heatmap;
pub mod panel;
pub mod spinner;
