//! Services for fetching, transforming and rendering submission data

pub mod calendar;
pub mod config;
pub mod heatmap;
pub mod pipeline;
pub mod stats_client;
pub mod streak;

pub use calendar::build_calendar;
pub use config::WidgetConfig;
pub use heatmap::render_heatmap;
pub use pipeline::RefreshPipeline;
pub use streak::compute_streaks;
