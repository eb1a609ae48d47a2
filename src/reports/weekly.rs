use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::ChartPoint;
use crate::reports::LABEL_FORMAT;

/// Length of the rolling histogram.
pub const WEEKS_SHOWN: usize = 7;

/// First day of a reporting week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// The most recent week start at or before `date`.
    pub fn week_of(self, date: NaiveDate) -> NaiveDate {
        let back = match self {
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
            WeekStart::Monday => date.weekday().num_days_from_monday(),
        };
        date - Duration::days(back as i64)
    }
}

/// Count timestamps per week over the seven weeks ending with the week of
/// `reference`, oldest week first. Sunday-start weeks.
pub fn bucket_by_week<Tz: TimeZone>(
    dates: &[DateTime<Tz>],
    reference: &DateTime<Tz>,
) -> Vec<ChartPoint> {
    bucket_by_week_starting(dates, reference, WeekStart::Sunday)
}

/// Same as [`bucket_by_week`] with a configurable first weekday.
///
/// Days are taken in the zone each timestamp carries. Timestamps outside
/// the window are ignored.
pub fn bucket_by_week_starting<Tz: TimeZone>(
    dates: &[DateTime<Tz>],
    reference: &DateTime<Tz>,
    week_start: WeekStart,
) -> Vec<ChartPoint> {
    let current = week_start.week_of(reference.date_naive());
    let anchors: Vec<NaiveDate> = (0..WEEKS_SHOWN)
        .rev()
        .map(|i| current - Duration::weeks(i as i64))
        .collect();

    let mut counts: HashMap<NaiveDate, u32> = anchors.iter().map(|a| (*a, 0)).collect();
    for date in dates {
        let week = week_start.week_of(date.date_naive());
        if let Some(count) = counts.get_mut(&week) {
            *count += 1;
        }
    }

    anchors
        .iter()
        .map(|a| ChartPoint::new(counts[a] as f64, a.format(LABEL_FORMAT).to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn reference() -> DateTime<Utc> {
        utc("2025-06-24T00:00:00Z")
    }

    const LABELS: [&str; 7] = [
        "11 May", "18 May", "25 May", "01 Jun", "08 Jun", "15 Jun", "22 Jun",
    ];

    fn values(points: &[ChartPoint]) -> Vec<f64> {
        points.iter().map(ChartPoint::value_or_zero).collect()
    }

    #[test]
    fn empty_input_is_zero_filled() {
        let points = bucket_by_week(&[], &reference());
        assert_eq!(points.len(), WEEKS_SHOWN);
        assert_eq!(points.iter().map(|p| p.label.as_str()).collect::<Vec<_>>(), LABELS);
        assert!(values(&points).iter().all(|v| *v == 0.0));
    }

    #[test]
    fn single_date_lands_in_its_week() {
        let points = bucket_by_week(&[utc("2025-06-12T10:00:00Z")], &reference());
        assert_eq!(values(&points), vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        assert_eq!(points[4].label, "08 Jun");
    }

    #[test]
    fn multiple_dates() {
        let dates = [
            utc("2025-06-12T10:00:00Z"),
            utc("2025-06-19T04:30:10Z"),
            utc("2025-06-20T09:10:05Z"),
        ];
        let points = bucket_by_week(&dates, &reference());
        assert_eq!(values(&points), vec![0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 0.0]);
    }

    #[test]
    fn dates_outside_window_are_ignored() {
        let dates = [
            utc("2025-05-10T12:00:00Z"),
            utc("2025-06-29T12:00:00Z"),
            utc("2024-06-12T12:00:00Z"),
        ];
        let points = bucket_by_week(&dates, &reference());
        assert_eq!(points.len(), WEEKS_SHOWN);
        assert!(values(&points).iter().all(|v| *v == 0.0));
    }

    #[test]
    fn sunday_is_its_own_week_start() {
        let points = bucket_by_week(&[utc("2025-06-22T08:00:00Z")], &reference());
        assert_eq!(points[6].value, Some(1.0));
    }

    #[test]
    fn monday_weeks() {
        let points = bucket_by_week_starting(
            &[utc("2025-06-22T08:00:00Z")],
            &reference(),
            WeekStart::Monday,
        );
        assert_eq!(points[6].label, "23 Jun");
        // Sunday the 22nd belongs to the week starting Monday the 16th.
        assert_eq!(points[5].label, "16 Jun");
        assert_eq!(points[5].value, Some(1.0));
    }

    #[test]
    fn window_spanning_new_year() {
        let points = bucket_by_week(&[utc("2025-12-30T10:00:00Z")], &utc("2026-01-02T10:00:00Z"));
        assert_eq!(points[0].label, "16 Nov");
        assert_eq!(points[6].label, "28 Dec");
        assert_eq!(points[6].value, Some(1.0));
    }
}
