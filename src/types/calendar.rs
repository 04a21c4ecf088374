//! Calendar types: submission map, days, weeks and streak stats

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of weeks in a calendar grid
pub const GRID_WEEKS: usize = 52;

/// Number of days in a week row
pub const DAYS_PER_WEEK: usize = 7;

/// Sparse map of UTC-midnight Unix timestamps (seconds) to submission counts.
/// Absent keys mean zero submissions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionCalendar(BTreeMap<i64, u64>);

impl SubmissionCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submission count for a day-start timestamp (0 when absent)
    pub fn count(&self, timestamp: i64) -> u64 {
        self.0.get(&timestamp).copied().unwrap_or(0)
    }

    pub fn insert(&mut self, timestamp: i64, count: u64) {
        self.0.insert(timestamp, count);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// UTC dates that have at least one submission, newest first, one entry per day
    pub fn active_dates_desc(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .0
            .iter()
            .filter(|(_, &count)| count > 0)
            .filter_map(|(&ts, _)| DateTime::from_timestamp(ts, 0))
            .map(|dt| dt.date_naive())
            .collect();
        dates.sort_unstable_by(|a, b| b.cmp(a));
        dates.dedup();
        dates
    }
}

impl FromIterator<(i64, u64)> for SubmissionCalendar {
    fn from_iter<I: IntoIterator<Item = (i64, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A single calendar day in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Day {
    pub date: NaiveDate,
    /// UTC midnight of `date` as Unix seconds
    pub timestamp: i64,
    pub count: u64,
    pub is_today: bool,
}

impl Day {
    pub fn is_active(&self) -> bool {
        self.count > 0
    }
}

/// Sunday-to-Saturday run of days. Future days are omitted, never padded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Week {
    pub days: Vec<Day>,
}

/// 52 weeks, oldest first, ending with the week that contains today
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CalendarGrid {
    pub weeks: Vec<Week>,
}

impl CalendarGrid {
    /// All days in chronological order
    pub fn days(&self) -> impl Iterator<Item = &Day> {
        self.weeks.iter().flat_map(|w| w.days.iter())
    }

    /// Last `n` weeks (or all of them when fewer exist)
    pub fn last_weeks(&self, n: usize) -> &[Week] {
        let start = self.weeks.len().saturating_sub(n);
        &self.weeks[start..]
    }

    pub fn total_submissions(&self) -> u64 {
        self.days().map(|d| d.count).sum()
    }
}

/// Streak statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreakStats {
    /// Longest run of active days inside the 52-week window
    pub max_streak: u32,
    /// Run of active days ending today or yesterday, over the full history
    pub current_streak: u32,
}
