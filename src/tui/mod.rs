//! Terminal panel for the streak widget

pub mod app;
pub mod widgets;

pub use app::run;
