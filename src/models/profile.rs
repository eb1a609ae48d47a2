use serde::{Deserialize, Serialize};

pub const MAX_WEEKLY_GOAL: u8 = 7;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    pub workouts: u32,
    /// Accumulated workout time in seconds.
    pub duration: f64,
    /// Target workouts per week, 0..=7.
    pub goal: u8,
}

impl Profile {
    pub fn average_duration(&self) -> f64 {
        if self.workouts == 0 {
            0.0
        } else {
            self.duration / self.workouts as f64
        }
    }

    pub fn clamp_goal(goal: i64) -> u8 {
        goal.clamp(0, MAX_WEEKLY_GOAL as i64) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_is_zero_without_workouts() {
        assert_eq!(Profile::default().average_duration(), 0.0);
    }

    #[test]
    fn average_divides_total() {
        let p = Profile {
            workouts: 4,
            duration: 7200.0,
            ..Default::default()
        };
        assert_eq!(p.average_duration(), 1800.0);
    }

    #[test]
    fn goal_is_clamped_to_a_week() {
        assert_eq!(Profile::clamp_goal(-3), 0);
        assert_eq!(Profile::clamp_goal(4), 4);
        assert_eq!(Profile::clamp_goal(12), 7);
    }
}
