use chrono::{Local, TimeZone};

use crate::models::{ChartPoint, WeightRecord};
use crate::reports::{ReportError, LABEL_FORMAT};

/// Chronological series for a record chart, labelled in local time.
pub fn to_chart_series(records: &[WeightRecord]) -> Vec<ChartPoint> {
    to_chart_series_in(records, &Local)
}

/// Chronological series with labels rendered in `tz`. Records sharing a
/// timestamp keep their input order.
pub fn to_chart_series_in<Tz>(records: &[WeightRecord], tz: &Tz) -> Vec<ChartPoint>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut sorted: Vec<&WeightRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.date);
    sorted
        .into_iter()
        .map(|r| {
            let label = r.date.with_timezone(tz).format(LABEL_FORMAT).to_string();
            ChartPoint::new(r.weight, label)
        })
        .collect()
}

/// Heaviest weight in the history.
pub fn best_weight(records: &[WeightRecord]) -> Result<f64, ReportError> {
    if records.is_empty() {
        return Err(ReportError::InvalidArgument("no records to take a best from"));
    }
    Ok(records
        .iter()
        .map(|r| r.weight)
        .fold(f64::NEG_INFINITY, f64::max))
}

/// Weight of the most recent record. On equal timestamps the later entry
/// in `records` wins.
pub fn latest_weight(records: &[WeightRecord]) -> Result<f64, ReportError> {
    records
        .iter()
        .max_by_key(|r| r.date)
        .map(|r| r.weight)
        .ok_or(ReportError::InvalidArgument("no records to take a latest from"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn rec(date: &str, weight: f64) -> WeightRecord {
        WeightRecord {
            date: DateTime::parse_from_rfc3339(date).unwrap().with_timezone(&Utc),
            weight,
        }
    }

    fn three() -> Vec<WeightRecord> {
        vec![
            rec("2025-06-12T10:00:00Z", 80.0),
            rec("2025-06-19T09:10:05Z", 100.0),
            rec("2025-06-24T04:30:10Z", 90.0),
        ]
    }

    #[test]
    fn series_of_nothing_is_empty() {
        assert!(to_chart_series_in(&[], &Utc).is_empty());
    }

    #[test]
    fn series_single_record() {
        let series = to_chart_series_in(&[rec("2025-06-12T10:00:00Z", 80.0)], &Utc);
        assert_eq!(series, vec![ChartPoint::new(80.0, "12 Jun")]);
    }

    #[test]
    fn series_is_sorted_without_touching_input() {
        let records = vec![
            rec("2025-06-12T10:00:00Z", 80.0),
            rec("2025-06-24T09:10:05Z", 100.0),
            rec("2025-06-19T04:30:10Z", 90.0),
        ];
        let series = to_chart_series_in(&records, &Utc);
        assert_eq!(
            series,
            vec![
                ChartPoint::new(80.0, "12 Jun"),
                ChartPoint::new(90.0, "19 Jun"),
                ChartPoint::new(100.0, "24 Jun"),
            ]
        );
        assert_eq!(records[1].weight, 100.0);
    }

    #[test]
    fn series_keeps_order_of_equal_dates() {
        let records = vec![
            rec("2025-06-19T10:00:00Z", 95.0),
            rec("2025-06-12T10:00:00Z", 80.0),
            rec("2025-06-19T10:00:00Z", 92.5),
        ];
        let values: Vec<_> = to_chart_series_in(&records, &Utc)
            .into_iter()
            .map(|p| p.value)
            .collect();
        assert_eq!(values, vec![Some(80.0), Some(95.0), Some(92.5)]);
    }

    #[test]
    fn best_of_single_and_many() {
        assert_eq!(best_weight(&[rec("2025-06-12T10:00:00Z", 80.0)]), Ok(80.0));
        assert_eq!(best_weight(&three()), Ok(100.0));
    }

    #[test]
    fn latest_ignores_input_order() {
        assert_eq!(latest_weight(&three()), Ok(90.0));
        let mut shuffled = three();
        shuffled.rotate_left(2);
        assert_eq!(latest_weight(&shuffled), Ok(90.0));
        shuffled.reverse();
        assert_eq!(latest_weight(&shuffled), Ok(90.0));
    }

    #[test]
    fn latest_tie_goes_to_later_entry() {
        let records = vec![
            rec("2025-06-24T04:30:10Z", 90.0),
            rec("2025-06-24T04:30:10Z", 92.5),
            rec("2025-06-01T04:30:10Z", 120.0),
        ];
        assert_eq!(latest_weight(&records), Ok(92.5));
    }

    #[test]
    fn empty_history_is_rejected() {
        assert!(matches!(best_weight(&[]), Err(ReportError::InvalidArgument(_))));
        assert!(matches!(latest_weight(&[]), Err(ReportError::InvalidArgument(_))));
    }
}
