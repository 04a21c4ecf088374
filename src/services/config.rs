//! Widget configuration
//!
//! Loaded from `~/.leetstreak/config.json` (every field optional) and
//! overridden by CLI flags. The pipeline receives it at construction.

use chrono::FixedOffset;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::types::{Result, StreakError};

/// Default stats API base URL
pub const DEFAULT_API_BASE: &str = "https://leetcode-stats-api.herokuapp.com";

/// Placeholder shipped in sample configs; treated the same as "unset"
pub const USERNAME_PLACEHOLDER: &str = "your_username_here";

/// Refresh interval default (1 hour, keeps clear of API rate limits)
const DEFAULT_REFRESH_INTERVAL_MS: u64 = 3_600_000;

/// IST (UTC+5:30)
const DEFAULT_TIMEZONE_OFFSET_HOURS: f64 = 5.5;

/// Real-world offsets stay within UTC-12..UTC+14
const MAX_OFFSET_HOURS: f64 = 14.0;

/// Panel geometry in pixels. Only `width` feeds the heatmap layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetLayout {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for WidgetLayout {
    fn default() -> Self {
        Self {
            left: 15,
            top: 335,
            width: 317,
            height: 125,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub username: Option<String>,
    /// Fixed hour offset from UTC used for "today". No DST handling.
    pub timezone_offset_hours: f64,
    pub refresh_interval_ms: u64,
    pub api_base: String,
    pub layout: WidgetLayout,
    pub highlight_today: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            username: None,
            timezone_offset_hours: DEFAULT_TIMEZONE_OFFSET_HOURS,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            api_base: DEFAULT_API_BASE.to_string(),
            layout: WidgetLayout::default(),
            highlight_today: true,
        }
    }
}

impl WidgetConfig {
    /// Default config file path (~/.leetstreak/config.json)
    pub fn default_path() -> Result<PathBuf> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| StreakError::Config("Cannot determine home directory".into()))?;
        Ok(base_dirs.home_dir().join(".leetstreak").join("config.json"))
    }

    /// Load `path`, falling back to defaults when the file is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            StreakError::Config(format!("Invalid config {}: {}", path.display(), e))
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| StreakError::Config(format!("Serialization failed: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Configured username, rejecting empty values and the sample placeholder
    pub fn username(&self) -> Result<&str> {
        match self.username.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() && name != USERNAME_PLACEHOLDER => Ok(name),
            _ => Err(StreakError::Config(
                "Please set your LeetCode username in the widget configuration".into(),
            )),
        }
    }

    /// Timezone offset as a chrono fixed offset, rounded to the second
    pub fn timezone(&self) -> Result<FixedOffset> {
        let hours = self.timezone_offset_hours;
        if !hours.is_finite() || hours.abs() > MAX_OFFSET_HOURS {
            return Err(StreakError::Config(format!(
                "Timezone offset {} is outside -{max}..+{max} hours",
                hours,
                max = MAX_OFFSET_HOURS
            )));
        }
        let seconds = (hours * 3600.0).round() as i32;
        FixedOffset::east_opt(seconds)
            .ok_or_else(|| StreakError::Config(format!("Invalid timezone offset {}", hours)))
    }

    pub fn refresh_interval(&self) -> Result<Duration> {
        if self.refresh_interval_ms == 0 {
            return Err(StreakError::Config(
                "Refresh interval must be greater than zero".into(),
            ));
        }
        Ok(Duration::from_millis(self.refresh_interval_ms))
    }

    /// Check every field the pipeline depends on
    pub fn validate(&self) -> Result<()> {
        self.username()?;
        self.timezone()?;
        self.refresh_interval()?;
        Ok(())
    }
}
