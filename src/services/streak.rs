//! Streak statistics
//!
//! The max streak only sees the 52-week grid. The current streak walks the
//! full submission history, so it may exceed the windowed max.

use chrono::{DateTime, FixedOffset, Utc};

use super::calendar::today_at;
use crate::types::{CalendarGrid, StreakStats, SubmissionCalendar};

/// Longest run of consecutive active days in the grid
pub fn max_streak(grid: &CalendarGrid) -> u32 {
    let mut best = 0u32;
    let mut run = 0u32;

    for day in grid.days() {
        if day.is_active() {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }

    best
}

/// Run of active days ending today or yesterday.
///
/// The most recent active day may be at most one day old; every earlier
/// link in the chain must be exactly one day apart.
pub fn current_streak(
    calendar: &SubmissionCalendar,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> u32 {
    let dates = calendar.active_dates_desc();
    let Some(&latest) = dates.first() else {
        return 0;
    };

    let today = today_at(now, offset);
    if (today - latest).num_days() > 1 {
        return 0;
    }

    let mut streak = 1u32;
    for pair in dates.windows(2) {
        if (pair[0] - pair[1]).num_days() == 1 {
            streak += 1;
        } else {
            break;
        }
    }

    streak
}

/// Both streak numbers for one refresh cycle
pub fn compute_streaks(
    grid: &CalendarGrid,
    calendar: &SubmissionCalendar,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> StreakStats {
    StreakStats {
        max_streak: max_streak(grid),
        current_streak: current_streak(calendar, now, offset),
    }
}
