//! Display-ready results handed to the presentation layer

use serde::Serialize;
use std::fmt::Write;

use super::{CalendarGrid, StreakStats};

/// One rounded rectangle of the heatmap image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapRect {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub radius: f64,
    pub fill: &'static str,
    /// Outline color and width, only set for a highlighted today cell
    pub stroke: Option<(&'static str, f64)>,
}

/// Vector description of the calendar heatmap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedImage {
    pub width: f64,
    pub height: f64,
    /// Number of week columns drawn
    pub weeks: usize,
    pub cells: Vec<HeatmapRect>,
}

impl RenderedImage {
    /// Serialize as a standalone SVG document.
    /// Numbers use Rust's shortest float formatting, so output is stable.
    pub fn to_svg(&self) -> String {
        let mut svg = String::with_capacity(64 + self.cells.len() * 128);
        let _ = write!(
            svg,
            r#"<svg width="{}" height="{}" xmlns="http://www.w3.org/2000/svg">"#,
            self.width, self.height
        );
        for cell in &self.cells {
            let (stroke, stroke_width) = cell.stroke.unwrap_or(("none", 0.0));
            let _ = write!(
                svg,
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}" stroke-width="{}" rx="{}" ry="{}"/>"#,
                cell.x,
                cell.y,
                cell.size,
                cell.size,
                cell.fill,
                stroke,
                stroke_width,
                cell.radius,
                cell.radius
            );
        }
        svg.push_str("</svg>");
        svg
    }
}

/// Successful output of one refresh cycle
#[derive(Debug, Clone, Serialize)]
pub struct DisplayData {
    pub username: String,
    pub grid: CalendarGrid,
    pub image: RenderedImage,
    pub stats: StreakStats,
}

/// Terminal artifact of a refresh cycle: either data or an error message
#[derive(Debug, Clone, Default, Serialize)]
pub struct DisplayResult {
    pub data: Option<DisplayData>,
    pub error: Option<String>,
}

impl DisplayResult {
    pub fn ok(data: DisplayData) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }

    pub fn stats(&self) -> Option<StreakStats> {
        self.data.as_ref().map(|d| d.stats)
    }
}

/// Widget lifecycle: loading until the first cycle finishes,
/// then ready or error. Errors keep the last good data around.
#[derive(Debug, Clone, Default)]
pub enum WidgetState {
    #[default]
    Loading,
    Ready(Box<DisplayData>),
    Error {
        message: String,
        last: Option<Box<DisplayData>>,
    },
}

impl WidgetState {
    /// Replace the state with the outcome of a refresh cycle
    pub fn apply(&mut self, result: DisplayResult) {
        let next = match (result.data, result.error) {
            (Some(data), None) => WidgetState::Ready(Box::new(data)),
            (data, error) => {
                let last = data.map(Box::new).or_else(|| self.take_last());
                WidgetState::Error {
                    message: error.unwrap_or_else(|| "Unknown error".to_string()),
                    last,
                }
            }
        };
        *self = next;
    }

    fn take_last(&mut self) -> Option<Box<DisplayData>> {
        match std::mem::take(self) {
            WidgetState::Ready(data) => Some(data),
            WidgetState::Error { last, .. } => last,
            WidgetState::Loading => None,
        }
    }

    /// Most recent successful data, stale or not
    pub fn data(&self) -> Option<&DisplayData> {
        match self {
            WidgetState::Ready(data) => Some(data.as_ref()),
            WidgetState::Error { last, .. } => last.as_deref(),
            WidgetState::Loading => None,
        }
    }

    /// Stats to show; zero while loading or when nothing ever loaded
    pub fn stats(&self) -> StreakStats {
        self.data().map(|d| d.stats).unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, WidgetState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            WidgetState::Error { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}
