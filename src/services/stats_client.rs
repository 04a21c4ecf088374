//! LeetCode stats API client
//!
//! `GET {api_base}/{username}` returns a JSON profile whose
//! `submissionCalendar` field is either a JSON-encoded string or an object
//! mapping stringified day timestamps to counts.

use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::types::{Result, StreakError, SubmissionCalendar};

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Field holding the day→count map in the profile response
const CALENDAR_FIELD: &str = "submissionCalendar";

/// Raw HTTP outcome, before status checks
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

/// Source of profile responses for a username
pub trait StatsSource: Send + Sync {
    /// Issue exactly one request for `username`
    fn fetch(&self, username: &str) -> Result<ApiResponse>;
}

/// Blocking HTTP source backed by reqwest
pub struct HttpStatsSource {
    client: reqwest::blocking::Client,
    api_base: String,
}

impl HttpStatsSource {
    pub fn new(api_base: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("leetstreak/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StreakError::Network(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn profile_url(&self, username: &str) -> String {
        format!("{}/{}", self.api_base, username)
    }
}

impl StatsSource for HttpStatsSource {
    fn fetch(&self, username: &str) -> Result<ApiResponse> {
        let url = self.profile_url(username);
        log::debug!("fetching {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| StreakError::Network(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("").to_string();
        let body = response
            .text()
            .map_err(|e| StreakError::Network(format!("Failed to read response: {}", e)))?;

        Ok(ApiResponse {
            status: status.as_u16(),
            reason,
            body,
        })
    }
}

/// Map non-success statuses to their error kinds
pub fn check_status(response: &ApiResponse, username: &str) -> Result<()> {
    match response.status {
        200..=299 => Ok(()),
        404 => Err(StreakError::NotFound(username.to_string())),
        429 => Err(StreakError::RateLimited),
        status => Err(StreakError::Api {
            status,
            reason: response.reason.clone(),
        }),
    }
}

/// Extract the submission calendar from a profile response body
pub fn parse_submission_calendar(body: &str) -> Result<SubmissionCalendar> {
    let profile: Value =
        serde_json::from_str(body).map_err(|e| StreakError::Parse(format!("invalid JSON: {}", e)))?;

    match profile.get(CALENDAR_FIELD) {
        Some(Value::String(encoded)) => serde_json::from_str(encoded)
            .map_err(|e| StreakError::Parse(format!("invalid {}: {}", CALENDAR_FIELD, e))),
        Some(map @ Value::Object(_)) => SubmissionCalendar::deserialize(map)
            .map_err(|e| StreakError::Parse(format!("invalid {}: {}", CALENDAR_FIELD, e))),
        Some(other) => Err(StreakError::Parse(format!(
            "unexpected {} type: {}",
            CALENDAR_FIELD,
            json_type_name(other)
        ))),
        None => Err(StreakError::Parse(format!("missing {}", CALENDAR_FIELD))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
