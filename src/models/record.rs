use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One logged one-rep max for an exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord {
    pub date: DateTime<Utc>,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepMax {
    pub exercise: String,
    pub history: Vec<WeightRecord>,
}
