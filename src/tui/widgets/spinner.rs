//! Loading spinner widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Spinner animation frames
const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

const LOADING_MESSAGE: &str = "Loading...";

/// Loading spinner widget, centered in its area
pub struct Spinner {
    frame: usize,
}

impl Spinner {
    pub fn new(frame: usize) -> Self {
        Self { frame }
    }

    /// Get the current spinner character
    pub fn current_char(&self) -> char {
        SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()]
    }

    /// Advance to next frame, returning the new frame index
    pub fn next_frame(frame: usize) -> usize {
        (frame + 1) % SPINNER_FRAMES.len()
    }
}

impl Widget for Spinner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let text = format!("{} {}", self.current_char(), LOADING_MESSAGE);
        let width = text.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height / 2;
        buf.set_string(x, y, &text, Style::default().fg(Color::Gray));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_current_char() {
        assert_eq!(Spinner::new(0).current_char(), '⠋');
        assert_eq!(Spinner::new(5).current_char(), '⠴');
    }

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(Spinner::new(10).current_char(), '⠋'); // 10 % 10 = 0
    }

    #[test]
    fn test_next_frame() {
        assert_eq!(Spinner::next_frame(0), 1);
        assert_eq!(Spinner::next_frame(9), 0);
    }

    #[test]
    fn test_renders_centered_message() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);

        Spinner::new(0).render(area, &mut buf);

        // "⠋ Loading..." is 12 wide → x = 4, y = 1
        assert_eq!(buf.cell((4, 1)).unwrap().symbol(), "⠋");
        assert_eq!(buf.cell((6, 1)).unwrap().symbol(), "L");
    }
}
