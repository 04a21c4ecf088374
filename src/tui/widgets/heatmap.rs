//! Terminal rendition of the 52-week submission heatmap

use chrono::Datelike;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::services::heatmap::HeatmapIntensity;
use crate::types::{CalendarGrid, DAYS_PER_WEEK};

/// Cell width: 1 glyph + 1 space
const CELL_WIDTH: u16 = 2;
const LABEL_WIDTH: u16 = 4; // "Mon "

const CELL_SYMBOL: &str = "■";
const TODAY_SYMBOL: &str = "▣";

/// Weekday labels on alternating rows (Sunday is row 0)
const DAY_LABELS: [(u16, &str); 3] = [(1, "Mon"), (3, "Wed"), (5, "Fri")];

const MONTH_NAMES: [&str; 13] = [
    "", "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Heatmap widget for ratatui
pub struct Heatmap<'a> {
    grid: &'a CalendarGrid,
    highlight_today: bool,
}

impl<'a> Heatmap<'a> {
    pub fn new(grid: &'a CalendarGrid, highlight_today: bool) -> Self {
        Self {
            grid,
            highlight_today,
        }
    }

    /// Week columns that fit a terminal width
    pub fn weeks_for_width(width: u16) -> usize {
        (width.saturating_sub(LABEL_WIDTH) / CELL_WIDTH) as usize
    }

    /// Rows needed: seven weekdays plus the month label row
    pub const fn height() -> u16 {
        DAYS_PER_WEEK as u16 + 1
    }

    fn render_labels(&self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(Color::DarkGray);
        for (row, label) in DAY_LABELS {
            if row < area.height {
                buf.set_string(area.x, area.y + row, label, style);
            }
        }
    }

    fn render_month_labels(&self, area: Rect, buf: &mut Buffer, weeks: usize) {
        let y = area.y + DAYS_PER_WEEK as u16;
        if y >= area.y + area.height {
            return;
        }

        let mut last_month: Option<u32> = None;
        let mut next_free_x = area.x;
        for (col, week) in self.grid.last_weeks(weeks).iter().enumerate() {
            let Some(first) = week.days.first() else {
                continue;
            };
            let month = first.date.month();
            if last_month == Some(month) {
                continue;
            }
            last_month = Some(month);

            let x = area.x + LABEL_WIDTH + col as u16 * CELL_WIDTH;
            // Skip labels that would overlap the previous one or the edge
            if x < next_free_x || x + 3 > area.x + area.width {
                continue;
            }
            buf.set_string(
                x,
                y,
                MONTH_NAMES[month as usize],
                Style::default().fg(Color::DarkGray),
            );
            next_free_x = x + 4;
        }
    }
}

impl Widget for Heatmap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let weeks = Self::weeks_for_width(area.width).min(self.grid.weeks.len());
        if weeks == 0 {
            return;
        }

        self.render_labels(area, buf);

        for (col, week) in self.grid.last_weeks(weeks).iter().enumerate() {
            let x = area.x + LABEL_WIDTH + col as u16 * CELL_WIDTH;
            for day in &week.days {
                let row = day.date.weekday().num_days_from_sunday() as u16;
                if row >= area.height {
                    continue;
                }

                let intensity =
                    HeatmapIntensity::from_count(day.count, day.is_today, self.highlight_today);
                let mut style = Style::default().fg(intensity.color());
                let symbol = if self.highlight_today && day.is_today {
                    style = style.add_modifier(Modifier::BOLD);
                    TODAY_SYMBOL
                } else {
                    CELL_SYMBOL
                };
                buf.set_string(x, area.y + row, symbol, style);
            }
        }

        self.render_month_labels(area, buf, weeks);
    }
}
