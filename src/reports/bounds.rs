use crate::models::ChartPoint;

/// Ceiling for a bar chart: the larger of the goal and the tallest bar.
/// Unset bars count as zero.
pub fn compute_display_max(points: &[ChartPoint], goal: f64) -> f64 {
    points
        .iter()
        .map(ChartPoint::value_or_zero)
        .fold(goal, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars() -> Vec<ChartPoint> {
        vec![
            ChartPoint::new(1.0, "08 Jun"),
            ChartPoint::new(2.0, "15 Jun"),
            ChartPoint::new(0.0, "22 Jun"),
        ]
    }

    #[test]
    fn goal_above_bars() {
        assert_eq!(compute_display_max(&bars(), 4.0), 4.0);
    }

    #[test]
    fn bar_above_goal() {
        assert_eq!(compute_display_max(&bars(), 1.0), 2.0);
    }

    #[test]
    fn empty_series_returns_goal() {
        assert_eq!(compute_display_max(&[], 1.0), 1.0);
    }

    #[test]
    fn unset_values_count_as_zero() {
        let points = vec![
            ChartPoint::blank("08 Jun"),
            ChartPoint::blank("15 Jun"),
            ChartPoint::new(0.0, "22 Jun"),
        ];
        assert_eq!(compute_display_max(&points, 0.0), 0.0);
    }

    #[test]
    fn never_below_goal_or_any_bar() {
        for goal in [0.0, 1.5, 3.0, 7.0] {
            let m = compute_display_max(&bars(), goal);
            assert!(m >= goal);
            assert!(bars().iter().all(|p| m >= p.value_or_zero()));
        }
    }
}
