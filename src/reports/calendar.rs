use chrono::{DateTime, TimeZone, Utc};

use crate::models::{CalendarMark, CalendarMarks};

/// Mark every calendar day (UTC) that has at least one timestamp.
pub fn build_calendar_marks<Tz: TimeZone>(dates: &[DateTime<Tz>]) -> CalendarMarks {
    dates
        .iter()
        .map(|d| {
            let key = d.with_timezone(&Utc).format("%Y-%m-%d").to_string();
            (key, CalendarMark::default())
        })
        .collect()
}
