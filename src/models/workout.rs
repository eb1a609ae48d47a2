use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Exercise;

/// A completed workout in the history log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: i64,
    pub routine_name: String,
    pub description: String,
    pub exercises: Vec<Exercise>,
    pub date: DateTime<Utc>,
    /// Seconds.
    pub duration: f64,
}

impl WorkoutRecord {
    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    /// Sum of weight × reps across every set.
    pub fn volume(&self) -> f64 {
        self.exercises
            .iter()
            .flat_map(|e| &e.sets)
            .map(|s| s.weight * s.reps as f64)
            .sum()
    }
}
