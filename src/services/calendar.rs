//! 52-week calendar grid builder

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};

use crate::types::{CalendarGrid, Day, SubmissionCalendar, Week, DAYS_PER_WEEK, GRID_WEEKS};

/// Today's date at the given fixed offset
pub fn today_at(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    now.with_timezone(&offset).date_naive()
}

/// UTC midnight of `date` as Unix seconds (the stats API's key format)
pub fn day_timestamp(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
}

/// Build the 52-week grid ending with the week that contains today.
/// Weeks run Sunday to Saturday; days after today are left out.
pub fn build_calendar(
    calendar: &SubmissionCalendar,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> CalendarGrid {
    let today = today_at(now, offset);

    let days_since_sunday = today.weekday().num_days_from_sunday();
    let week_start = today - Duration::days(days_since_sunday as i64);
    let grid_start = week_start - Duration::weeks((GRID_WEEKS - 1) as i64);

    let weeks = (0..GRID_WEEKS)
        .map(|week_idx| {
            let days = (0..DAYS_PER_WEEK)
                .map(|day_idx| {
                    grid_start + Duration::weeks(week_idx as i64) + Duration::days(day_idx as i64)
                })
                .take_while(|&date| date <= today)
                .map(|date| {
                    let timestamp = day_timestamp(date);
                    Day {
                        date,
                        timestamp,
                        count: calendar.count(timestamp),
                        is_today: date == today,
                    }
                })
                .collect();
            Week { days }
        })
        .collect();

    CalendarGrid { weeks }
}
