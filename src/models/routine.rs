use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Set {
    pub reps: u32,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub exercise_name: String,
    pub sets: Vec<Set>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Routine {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub exercises: Vec<Exercise>,
}

pub const DEFAULT_ROUTINE_NAME: &str = "New Routine";
pub const DEFAULT_ROUTINE_DESCRIPTION: &str = "-";

/// Edit of a single set, addressed by exercise and set index.
///
/// Parsed from `E-S=WEIGHTxREPS`. Either side of the `x` may be left out
/// to keep the stored value, e.g. `0-1=85x` or `2-0=x8`.
#[derive(Debug, Clone, PartialEq)]
pub struct SetOverride {
    pub exercise: usize,
    pub set: usize,
    pub weight: Option<f64>,
    pub reps: Option<u32>,
}

impl FromStr for SetOverride {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected E-S=WEIGHTxREPS, got '{}'", s))?;
        let (exercise, set) = key
            .split_once('-')
            .ok_or_else(|| anyhow!("Expected exercise-set index pair, got '{}'", key))?;
        let exercise = exercise
            .trim()
            .parse::<usize>()
            .with_context(|| format!("Bad exercise index '{}'", exercise))?;
        let set = set
            .trim()
            .parse::<usize>()
            .with_context(|| format!("Bad set index '{}'", set))?;

        let (weight, reps) = match value.split_once(['x', 'X']) {
            Some((w, r)) => (w.trim(), r.trim()),
            None => (value.trim(), ""),
        };
        let weight = if weight.is_empty() {
            None
        } else {
            let w: f64 = weight
                .parse()
                .with_context(|| format!("Bad weight '{}'", weight))?;
            if !w.is_finite() || w < 0.0 {
                bail!("Weight must be a non-negative number, got '{}'", weight);
            }
            Some(w)
        };
        let reps = if reps.is_empty() {
            None
        } else {
            Some(reps.parse::<u32>().with_context(|| format!("Bad reps '{}'", reps))?)
        };

        Ok(SetOverride {
            exercise,
            set,
            weight,
            reps,
        })
    }
}

/// Return a copy of `exercises` with the overrides applied.
pub fn apply_overrides(exercises: &[Exercise], overrides: &[SetOverride]) -> Result<Vec<Exercise>> {
    let mut updated = exercises.to_vec();
    for o in overrides {
        let exercise = updated
            .get_mut(o.exercise)
            .ok_or_else(|| anyhow!("No exercise at index {}", o.exercise))?;
        let name = exercise.exercise_name.clone();
        let set = exercise
            .sets
            .get_mut(o.set)
            .ok_or_else(|| anyhow!("{} has no set at index {}", name, o.set))?;
        if let Some(w) = o.weight {
            set.weight = w;
        }
        if let Some(r) = o.reps {
            set.reps = r;
        }
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squat() -> Vec<Exercise> {
        vec![Exercise {
            exercise_name: "Squat".into(),
            sets: vec![
                Set { reps: 5, weight: 100.0 },
                Set { reps: 5, weight: 100.0 },
            ],
        }]
    }

    #[test]
    fn parses_full_override() {
        let o: SetOverride = "0-1=102.5x3".parse().unwrap();
        assert_eq!(
            o,
            SetOverride {
                exercise: 0,
                set: 1,
                weight: Some(102.5),
                reps: Some(3)
            }
        );
    }

    #[test]
    fn parses_partial_overrides() {
        let w: SetOverride = "1-0=80x".parse().unwrap();
        assert_eq!((w.weight, w.reps), (Some(80.0), None));
        let r: SetOverride = "1-0=x12".parse().unwrap();
        assert_eq!((r.weight, r.reps), (None, Some(12)));
        let bare: SetOverride = "1-0=60".parse().unwrap();
        assert_eq!((bare.weight, bare.reps), (Some(60.0), None));
    }

    #[test]
    fn rejects_malformed_override() {
        assert!("0-1".parse::<SetOverride>().is_err());
        assert!("a-1=5x5".parse::<SetOverride>().is_err());
        assert!("0-1=-5x5".parse::<SetOverride>().is_err());
    }

    #[test]
    fn overrides_touch_only_addressed_set() {
        let original = squat();
        let updated = apply_overrides(
            &original,
            &[SetOverride {
                exercise: 0,
                set: 1,
                weight: Some(110.0),
                reps: None,
            }],
        )
        .unwrap();
        assert_eq!(updated[0].sets[0], Set { reps: 5, weight: 100.0 });
        assert_eq!(updated[0].sets[1], Set { reps: 5, weight: 110.0 });
        assert_eq!(original[0].sets[1].weight, 100.0);
    }

    #[test]
    fn out_of_range_override_is_an_error() {
        let o = SetOverride {
            exercise: 0,
            set: 9,
            weight: None,
            reps: Some(1),
        };
        assert!(apply_overrides(&squat(), &[o]).is_err());
    }
}
