//! SVG heatmap renderer for the calendar grid

use chrono::Datelike;
use ratatui::style::Color;

use crate::types::{CalendarGrid, Day, HeatmapRect, RenderedImage, DAYS_PER_WEEK};

/// Cell edge length in px
pub const CELL_SIZE: f64 = 8.0;
/// Gap between cells in px
pub const CELL_MARGIN: f64 = 1.5;
const CORNER_RADIUS: f64 = 1.5;
/// Horizontal panel padding subtracted from the width budget
pub const WIDTH_PADDING: f64 = 16.0;
/// Offsets of the first cell inside the image
const X_OFFSET: f64 = 1.0;
const Y_OFFSET: f64 = 5.0;

const TODAY_STROKE: &str = "#555";
const TODAY_STROKE_WIDTH: f64 = 0.5;

/// Heatmap intensity level keyed on the daily submission count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatmapIntensity {
    /// No submissions
    None,
    /// No submissions, but it is today (highlight mode only)
    EmptyToday,
    /// 1 submission
    Low,
    /// 2 submissions
    Medium,
    /// 3+ submissions (exactly 3 in highlight mode)
    High,
    /// 4+ submissions (highlight mode only)
    Max,
}

impl HeatmapIntensity {
    /// Map a count to its level. Without highlighting there are four levels;
    /// highlighting splits off today's empty cell and a 4+ bucket.
    pub fn from_count(count: u64, is_today: bool, highlight_today: bool) -> Self {
        match count {
            0 if highlight_today && is_today => Self::EmptyToday,
            0 => Self::None,
            1 => Self::Low,
            2 => Self::Medium,
            3 => Self::High,
            _ if highlight_today => Self::Max,
            _ => Self::High,
        }
    }

    /// SVG fill color (GitHub-style green gradient on a dark panel)
    pub fn hex(self) -> &'static str {
        match self {
            Self::None => "#1a1a1a",
            Self::EmptyToday => "#2a2a2a",
            Self::Low => "#0e4429",
            Self::Medium => "#006d32",
            Self::High => "#26a641",
            Self::Max => "#39d353",
        }
    }

    /// Terminal color for the same level (ANSI 256)
    pub fn color(self) -> Color {
        match self {
            Self::None => Color::Indexed(235),
            Self::EmptyToday => Color::Indexed(238),
            Self::Low => Color::Indexed(22),
            Self::Medium => Color::Indexed(28),
            Self::High => Color::Indexed(34),
            Self::Max => Color::Indexed(40),
        }
    }
}

/// Number of week columns that fit a pixel width budget
pub fn weeks_for_width(width_budget_px: u32) -> usize {
    let available = (width_budget_px as f64 - WIDTH_PADDING).max(0.0);
    (available / (CELL_SIZE + CELL_MARGIN)).floor() as usize
}

/// Image width for a number of week columns
pub fn image_width(weeks: usize) -> f64 {
    (weeks as f64 * (CELL_SIZE + CELL_MARGIN) - CELL_MARGIN + X_OFFSET).max(0.0)
}

/// Image height: always seven rows
pub fn image_height() -> f64 {
    DAYS_PER_WEEK as f64 * (CELL_SIZE + CELL_MARGIN) - CELL_MARGIN + Y_OFFSET
}

fn render_cell(week_idx: usize, day: &Day, highlight_today: bool) -> HeatmapRect {
    let row = day.date.weekday().num_days_from_sunday() as f64;
    let intensity = HeatmapIntensity::from_count(day.count, day.is_today, highlight_today);

    HeatmapRect {
        x: week_idx as f64 * (CELL_SIZE + CELL_MARGIN) + X_OFFSET,
        y: row * (CELL_SIZE + CELL_MARGIN) + Y_OFFSET,
        size: CELL_SIZE,
        radius: CORNER_RADIUS,
        fill: intensity.hex(),
        stroke: (highlight_today && day.is_today).then_some((TODAY_STROKE, TODAY_STROKE_WIDTH)),
    }
}

/// Lay out the most recent weeks that fit `width_budget_px`.
/// Older weeks are dropped; the newest week is always the rightmost column.
pub fn render_heatmap(
    grid: &CalendarGrid,
    width_budget_px: u32,
    highlight_today: bool,
) -> RenderedImage {
    let weeks = weeks_for_width(width_budget_px).min(grid.weeks.len());

    let cells = grid
        .last_weeks(weeks)
        .iter()
        .enumerate()
        .flat_map(|(week_idx, week)| {
            week.days
                .iter()
                .map(move |day| render_cell(week_idx, day, highlight_today))
        })
        .collect();

    RenderedImage {
        width: image_width(weeks),
        height: image_height(),
        weeks,
        cells,
    }
}
