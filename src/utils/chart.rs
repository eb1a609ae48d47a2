use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{CalendarMarks, ChartPoint};
use crate::reports::WeekStart;
use crate::utils::format::format_weight;

/// Horizontal bar chart rows, scaled so that `max` fills `width` cells.
/// The column holding `goal` is drawn as `│` where a bar does not cover it.
pub fn render_bars(points: &[ChartPoint], max: f64, goal: f64, width: usize) -> Vec<String> {
    let scale = |v: f64| -> usize {
        if max <= 0.0 {
            0
        } else {
            ((v / max) * width as f64).round().min(width as f64) as usize
        }
    };
    let goal_col = (goal > 0.0).then(|| scale(goal).saturating_sub(1));

    points
        .iter()
        .map(|p| {
            let filled = scale(p.value_or_zero());
            let cells: String = (0..width)
                .map(|i| {
                    if i < filled {
                        '█'
                    } else if Some(i) == goal_col {
                        '│'
                    } else {
                        '·'
                    }
                })
                .collect();
            let value = p.value.map(format_weight).unwrap_or_else(|| "-".to_string());
            format!("{:>6} {} {}", p.label, cells, value)
        })
        .collect()
}

/// Month grid with marked days shown as `●`.
pub fn render_month(year: i32, month: u32, marks: &CalendarMarks, week_start: WeekStart) -> Vec<String> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let mut lines = vec![format!("{:^27}", first.format("%B %Y").to_string())];
    lines.push(match week_start {
        WeekStart::Sunday => " Su  Mo  Tu  We  Th  Fr  Sa".to_string(),
        WeekStart::Monday => " Mo  Tu  We  Th  Fr  Sa  Su".to_string(),
    });

    let mut day = week_start.week_of(first);
    while day.month() == month || day < first {
        let mut row = String::new();
        for _ in 0..7 {
            if day.month() == month {
                let key = day.format("%Y-%m-%d").to_string();
                let dot = if marks.contains_key(&key) { '●' } else { ' ' };
                row.push_str(&format!("{:>3}{}", day.day(), dot));
            } else {
                row.push_str("    ");
            }
            day += Duration::days(1);
        }
        lines.push(row.trim_end().to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CalendarMark;

    #[test]
    fn bars_scale_to_width() {
        let points = vec![ChartPoint::new(2.0, "08 Jun"), ChartPoint::new(4.0, "15 Jun")];
        let rows = render_bars(&points, 4.0, 0.0, 4);
        assert_eq!(rows[0], "08 Jun ██·· 2");
        assert_eq!(rows[1], "15 Jun ████ 4");
    }

    #[test]
    fn goal_column_is_drawn() {
        let points = vec![ChartPoint::new(0.0, "08 Jun")];
        let rows = render_bars(&points, 4.0, 2.0, 4);
        assert_eq!(rows[0], "08 Jun ·│·· 0");
    }

    #[test]
    fn zero_max_draws_empty_bars() {
        let rows = render_bars(&[ChartPoint::blank("08 Jun")], 0.0, 0.0, 3);
        assert_eq!(rows[0], "08 Jun ··· -");
    }

    #[test]
    fn month_grid_marks_days() {
        let mut marks = CalendarMarks::new();
        marks.insert("2025-06-12".into(), CalendarMark::default());
        let lines = render_month(2025, 6, &marks, WeekStart::Sunday);
        assert!(lines[0].contains("June 2025"));
        // June 2025 starts on a Sunday and spans five rows.
        assert_eq!(lines.len(), 2 + 5);
        assert!(lines[2].starts_with("  1 "));
        assert!(lines[3].contains("12●"));
    }

    #[test]
    fn invalid_month_is_empty() {
        assert!(render_month(2025, 13, &CalendarMarks::new(), WeekStart::Sunday).is_empty());
    }
}
