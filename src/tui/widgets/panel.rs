//! Widget panel: title, username, streak counter and calendar body

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

use super::heatmap::Heatmap;
use super::spinner::Spinner;
use crate::types::WidgetState;

const TITLE: &str = "LeetCode";
const STREAK_COLOR: Color = Color::Indexed(40);
const ERROR_COLOR: Color = Color::Indexed(203);

/// Panel widget for ratatui
pub struct Panel<'a> {
    state: &'a WidgetState,
    username: Option<&'a str>,
    highlight_today: bool,
    spinner_frame: usize,
    refreshing: bool,
}

impl<'a> Panel<'a> {
    pub fn new(state: &'a WidgetState, username: Option<&'a str>) -> Self {
        Self {
            state,
            username,
            highlight_today: true,
            spinner_frame: 0,
            refreshing: false,
        }
    }

    pub fn highlight_today(mut self, highlight: bool) -> Self {
        self.highlight_today = highlight;
        self
    }

    pub fn spinner_frame(mut self, frame: usize) -> Self {
        self.spinner_frame = frame;
        self
    }

    pub fn refreshing(mut self, refreshing: bool) -> Self {
        self.refreshing = refreshing;
        self
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let stats = self.state.stats();
        let muted = Style::default().fg(Color::DarkGray);
        let streak = Line::from(vec![
            Span::styled(
                stats.current_streak.to_string(),
                Style::default()
                    .fg(STREAK_COLOR)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" streak", muted),
            Span::styled(format!("  best {}", stats.max_streak), muted),
        ]);

        let [title_area, streak_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(streak.width() as u16),
        ])
        .areas(area);

        let mut title = vec![Span::styled(
            TITLE,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(name) = self.username {
            title.push(Span::styled(format!("  @{}", name), muted));
        }
        Paragraph::new(Line::from(title)).render(title_area, buf);
        Paragraph::new(streak)
            .alignment(Alignment::Right)
            .render(streak_area, buf);
    }

    fn render_body(&self, area: Rect, buf: &mut Buffer) {
        match self.state {
            WidgetState::Loading => Spinner::new(self.spinner_frame).render(area, buf),
            WidgetState::Error { message, .. } => {
                Paragraph::new(message.as_str())
                    .style(Style::default().fg(ERROR_COLOR))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .render(area, buf);
            }
            WidgetState::Ready(data) => {
                Heatmap::new(&data.grid, self.highlight_today).render(area, buf);
            }
        }
    }

    fn render_footer(&self, area: Rect, buf: &mut Buffer) {
        let muted = Style::default().fg(Color::DarkGray);
        let mut spans = vec![
            Span::styled("r", Style::default().fg(Color::Gray)),
            Span::styled(" refresh  ", muted),
            Span::styled("q", Style::default().fg(Color::Gray)),
            Span::styled(" quit", muted),
        ];
        if self.refreshing {
            let frame = Spinner::new(self.spinner_frame).current_char();
            spans.push(Span::styled(format!("  {} refreshing", frame), muted));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

impl Widget for Panel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1),              // Header
            Constraint::Length(1),              // Blank
            Constraint::Min(Heatmap::height()), // Calendar / message
            Constraint::Length(1),              // Keybindings
        ])
        .split(inner);

        self.render_header(chunks[0], buf);
        self.render_body(chunks[2], buf);
        self.render_footer(chunks[3], buf);
    }
}
