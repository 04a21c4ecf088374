//! Refresh pipeline: fetch → parse → grid → streaks + heatmap
//!
//! One call is one refresh cycle. Nothing is carried between cycles.

use chrono::{DateTime, Utc};

use super::calendar::build_calendar;
use super::config::WidgetConfig;
use super::heatmap::render_heatmap;
use super::stats_client::{check_status, parse_submission_calendar, HttpStatsSource, StatsSource};
use super::streak::compute_streaks;
use crate::types::{DisplayData, DisplayResult, Result, SubmissionCalendar};

pub struct RefreshPipeline {
    config: WidgetConfig,
    source: Box<dyn StatsSource>,
}

impl RefreshPipeline {
    /// Pipeline talking to the configured stats API over HTTP
    pub fn new(config: WidgetConfig) -> Result<Self> {
        let source = HttpStatsSource::new(&config.api_base)?;
        Ok(Self::with_source(config, Box::new(source)))
    }

    /// Pipeline over a custom source (used by tests)
    pub fn with_source(config: WidgetConfig, source: Box<dyn StatsSource>) -> Self {
        Self { config, source }
    }

    /// Run one cycle, propagating the first failure
    pub fn refresh(&self, now: DateTime<Utc>) -> Result<DisplayData> {
        let username = self.config.username()?;
        let offset = self.config.timezone()?;

        let response = self.source.fetch(username)?;
        check_status(&response, username)?;
        let calendar = parse_submission_calendar(&response.body)?;

        Ok(self.transform(username, &calendar, now, offset))
    }

    /// Run one cycle; failures are folded into the result's error message
    pub fn refresh_display(&self, now: DateTime<Utc>) -> DisplayResult {
        match self.refresh(now) {
            Ok(data) => {
                log::info!(
                    "LeetCode data loaded for {} - current streak: {}, max streak: {}",
                    data.username,
                    data.stats.current_streak,
                    data.stats.max_streak
                );
                DisplayResult::ok(data)
            }
            Err(e) => {
                log::warn!("refresh failed: {}", e);
                DisplayResult::err(e.to_string())
            }
        }
    }

    fn transform(
        &self,
        username: &str,
        calendar: &SubmissionCalendar,
        now: DateTime<Utc>,
        offset: chrono::FixedOffset,
    ) -> DisplayData {
        let grid = build_calendar(calendar, now, offset);
        let image = render_heatmap(&grid, self.config.layout.width, self.config.highlight_today);
        let stats = compute_streaks(&grid, calendar, now, offset);

        DisplayData {
            username: username.to_string(),
            grid,
            image,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::calendar::day_timestamp;
    use crate::services::stats_client::ApiResponse;
    use crate::types::StreakError;
    use chrono::{Duration, NaiveDate, TimeZone};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Canned response source that counts requests
    struct FakeSource {
        status: u16,
        reason: &'static str,
        body: String,
        calls: Arc<AtomicUsize>,
    }

    impl FakeSource {
        fn new(status: u16, reason: &'static str, body: impl Into<String>) -> Self {
            Self {
                status,
                reason,
                body: body.into(),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl StatsSource for FakeSource {
        fn fetch(&self, _username: &str) -> Result<ApiResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ApiResponse {
                status: self.status,
                reason: self.reason.to_string(),
                body: self.body.clone(),
            })
        }
    }

    struct OfflineSource;

    impl StatsSource for OfflineSource {
        fn fetch(&self, _username: &str) -> Result<ApiResponse> {
            Err(StreakError::Network("connection refused".into()))
        }
    }

    fn config(username: Option<&str>) -> WidgetConfig {
        WidgetConfig {
            username: username.map(String::from),
            timezone_offset_hours: 0.0,
            ..Default::default()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 12, 12, 0, 0).unwrap()
    }

    fn body_with_days_ago(days_ago: &[i64]) -> String {
        let today = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        let entries: Vec<String> = days_ago
            .iter()
            .map(|&n| format!("\"{}\": 2", day_timestamp(today - Duration::days(n))))
            .collect();
        let calendar = format!("{{{}}}", entries.join(","));
        serde_json::json!({ "status": "success", "submissionCalendar": calendar }).to_string()
    }

    #[test]
    fn test_refresh_success() {
        let source = FakeSource::new(200, "OK", body_with_days_ago(&[0, 1, 2]));
        let pipeline = RefreshPipeline::with_source(config(Some("alice")), Box::new(source));

        let data = pipeline.refresh(now()).unwrap();

        assert_eq!(data.username, "alice");
        assert_eq!(data.grid.weeks.len(), 52);
        assert_eq!(data.stats.current_streak, 3);
        assert_eq!(data.stats.max_streak, 3);
        assert_eq!(data.image.weeks, 31);
    }

    #[test]
    fn test_missing_username_skips_request() {
        let source = FakeSource::new(200, "OK", body_with_days_ago(&[]));
        let calls = source.calls.clone();
        let pipeline = RefreshPipeline::with_source(config(None), Box::new(source));

        let err = pipeline.refresh(now()).unwrap_err();

        assert!(matches!(err, StreakError::Config(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_single_request_per_cycle() {
        let source = FakeSource::new(200, "OK", body_with_days_ago(&[0]));
        let calls = source.calls.clone();
        let pipeline = RefreshPipeline::with_source(config(Some("alice")), Box::new(source));

        pipeline.refresh(now()).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_not_found_surfaces_username() {
        let source = FakeSource::new(404, "Not Found", "");
        let pipeline = RefreshPipeline::with_source(config(Some("ghost_user")), Box::new(source));

        let result = pipeline.refresh_display(now());

        assert!(result.data.is_none());
        let message = result.error.unwrap();
        assert!(message.contains("ghost_user"), "message was: {}", message);
    }

    #[test]
    fn test_rate_limit_error_message() {
        let source = FakeSource::new(429, "Too Many Requests", "");
        let pipeline = RefreshPipeline::with_source(config(Some("alice")), Box::new(source));

        let err = pipeline.refresh(now()).unwrap_err();

        assert!(matches!(err, StreakError::RateLimited));
    }

    #[test]
    fn test_parse_error_on_missing_calendar() {
        let source = FakeSource::new(200, "OK", r#"{"status":"success"}"#);
        let pipeline = RefreshPipeline::with_source(config(Some("alice")), Box::new(source));

        let err = pipeline.refresh(now()).unwrap_err();

        assert!(matches!(err, StreakError::Parse(_)));
    }

    #[test]
    fn test_network_error_folded_into_result() {
        let pipeline = RefreshPipeline::with_source(config(Some("alice")), Box::new(OfflineSource));

        let result = pipeline.refresh_display(now());

        assert!(result.stats().is_none());
        assert!(result.error.unwrap().contains("connection refused"));
    }

    #[test]
    fn test_invalid_timezone_is_config_error() {
        let source = FakeSource::new(200, "OK", body_with_days_ago(&[0]));
        let mut cfg = config(Some("alice"));
        cfg.timezone_offset_hours = 30.0;
        let pipeline = RefreshPipeline::with_source(cfg, Box::new(source));

        assert!(matches!(
            pipeline.refresh(now()),
            Err(StreakError::Config(_))
        ));
    }

    #[test]
    fn test_empty_calendar_gives_zero_stats() {
        let source = FakeSource::new(200, "OK", r#"{"submissionCalendar":"{}"}"#);
        let pipeline = RefreshPipeline::with_source(config(Some("alice")), Box::new(source));

        let data = pipeline.refresh(now()).unwrap();

        assert_eq!(data.stats.current_streak, 0);
        assert_eq!(data.stats.max_streak, 0);
        assert_eq!(data.grid.total_submissions(), 0);
    }

    #[test]
    fn test_width_budget_controls_image() {
        let source = FakeSource::new(200, "OK", body_with_days_ago(&[0]));
        let mut cfg = config(Some("alice"));
        cfg.layout.width = 111;
        let pipeline = RefreshPipeline::with_source(cfg, Box::new(source));

        let data = pipeline.refresh(now()).unwrap();

        assert_eq!(data.image.weeks, 10);
        assert_eq!(data.image.width, 94.5);
    }
}
