//! Application state, refresh worker and event loop

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget, DefaultTerminal, Frame};

use crate::services::{RefreshPipeline, WidgetConfig};
use crate::types::{DisplayResult, WidgetState};

use super::widgets::panel::Panel;
use super::widgets::spinner::Spinner;

/// Requests from the UI thread to the refresh worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerCommand {
    RefreshNow,
}

/// Main application
pub struct App {
    state: WidgetState,
    username: Option<String>,
    highlight_today: bool,
    spinner_frame: usize,
    /// A cycle is in flight (set on manual refresh, cleared by its result)
    refreshing: bool,
    refresh_requested: bool,
    should_quit: bool,
}

impl App {
    /// Create a new app in loading state
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            state: WidgetState::Loading,
            username: config.username().ok().map(String::from),
            highlight_today: config.highlight_today,
            spinner_frame: 0,
            refreshing: false,
            refresh_requested: false,
            should_quit: false,
        }
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        self.should_quit = true;
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') if !self.refreshing => {
                        self.refresh_requested = true;
                        self.refreshing = true;
                    }
                    _ => {}
                }
            }
        }
    }

    /// Apply the outcome of a refresh cycle
    pub fn apply_result(&mut self, result: DisplayResult) {
        self.state.apply(result);
        self.refreshing = false;
    }

    /// Take a pending manual refresh request
    pub fn take_refresh_request(&mut self) -> bool {
        std::mem::take(&mut self.refresh_requested)
    }

    /// Update spinner animation
    pub fn tick(&mut self) {
        if self.state.is_loading() || self.refreshing {
            self.spinner_frame = Spinner::next_frame(self.spinner_frame);
        }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw the application
    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Panel::new(&self.state, self.username.as_deref())
            .highlight_today(self.highlight_today)
            .spinner_frame(self.spinner_frame)
            .refreshing(self.refreshing)
            .render(area, buf);
    }
}

/// Spawn the background worker that runs refresh cycles back to back,
/// waiting `interval` between them. Cycles never overlap: the worker only
/// starts the next one after the previous result has been sent.
/// The worker exits once either channel end is dropped.
pub fn spawn_refresh_worker(
    pipeline: RefreshPipeline,
    interval: Duration,
) -> (Sender<WorkerCommand>, Receiver<DisplayResult>) {
    let (command_tx, command_rx) = mpsc::channel();
    let (result_tx, result_rx) = mpsc::channel();

    thread::spawn(move || loop {
        let result = pipeline.refresh_display(Utc::now());
        if result_tx.send(result).is_err() {
            break;
        }

        match command_rx.recv_timeout(interval) {
            Ok(WorkerCommand::RefreshNow) | Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    });

    (command_tx, result_rx)
}

/// Run the TUI application
pub fn run(config: WidgetConfig) -> anyhow::Result<()> {
    let interval = config.refresh_interval()?;
    let mut app = App::new(&config);
    let pipeline = RefreshPipeline::new(config)?;

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &mut app, pipeline, interval);
    ratatui::restore();
    result
}

fn run_app(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    pipeline: RefreshPipeline,
    interval: Duration,
) -> anyhow::Result<()> {
    let (command_tx, result_rx) = spawn_refresh_worker(pipeline, interval);

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        // Check for refresh completion (non-blocking)
        if let Ok(result) = result_rx.try_recv() {
            app.apply_result(result);
        }

        if app.take_refresh_request() {
            let _ = command_tx.send(WorkerCommand::RefreshNow);
        }

        // Poll for events with 100ms timeout for spinner animation
        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        } else {
            app.tick();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::stats_client::{ApiResponse, StatsSource};
    use crossterm::event::{KeyEvent, KeyModifiers};

    struct StaticSource(&'static str);

    impl StatsSource for StaticSource {
        fn fetch(&self, _username: &str) -> crate::types::Result<ApiResponse> {
            Ok(ApiResponse {
                status: 200,
                reason: "OK".into(),
                body: self.0.to_string(),
            })
        }
    }

    fn config() -> WidgetConfig {
        WidgetConfig {
            username: Some("alice".into()),
            ..Default::default()
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_app_initial_state() {
        let app = App::new(&config());
        assert!(app.state().is_loading());
        assert!(!app.should_quit());
        assert_eq!(app.username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_placeholder_username_not_displayed() {
        let app = App::new(&WidgetConfig {
            username: Some("your_username_here".into()),
            ..Default::default()
        });
        assert!(app.username.is_none());
    }

    #[test]
    fn test_app_quit_on_q() {
        let mut app = App::new(&config());
        app.handle_event(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_app_quit_on_esc() {
        let mut app = App::new(&config());
        app.handle_event(key(KeyCode::Esc));
        assert!(app.should_quit());
    }

    #[test]
    fn test_refresh_request_taken_once() {
        let mut app = App::new(&config());
        app.handle_event(key(KeyCode::Char('r')));

        assert!(app.take_refresh_request());
        assert!(!app.take_refresh_request());
        assert!(app.refreshing);
    }

    #[test]
    fn test_refresh_ignored_while_in_flight() {
        let mut app = App::new(&config());
        app.handle_event(key(KeyCode::Char('r')));
        app.take_refresh_request();

        app.handle_event(key(KeyCode::Char('r')));
        assert!(!app.take_refresh_request());

        app.apply_result(DisplayResult::err("boom"));
        assert!(!app.refreshing);
    }

    #[test]
    fn test_tick_only_animates_while_busy() {
        let mut app = App::new(&config());
        app.tick();
        assert_eq!(app.spinner_frame, 1);

        app.apply_result(DisplayResult::err("boom"));
        app.tick();
        assert_eq!(app.spinner_frame, 1);
    }

    #[test]
    fn test_worker_delivers_result_and_honours_refresh() {
        let pipeline = RefreshPipeline::with_source(
            config(),
            Box::new(StaticSource(r#"{"submissionCalendar":"{}"}"#)),
        );
        let (command_tx, result_rx) = spawn_refresh_worker(pipeline, Duration::from_secs(3600));

        let first = result_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(first.error.is_none());

        command_tx.send(WorkerCommand::RefreshNow).unwrap();
        let second = result_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(second.stats().unwrap().current_streak, 0);
    }

    #[test]
    fn test_app_applies_worker_result() {
        let mut app = App::new(&config());
        app.apply_result(DisplayResult::err("User 'alice' not found."));
        assert_eq!(app.state().error(), Some("User 'alice' not found."));
    }
}
