use serde::{Deserialize, Serialize};

/// Muscle groups with their sub-targets.
pub const TARGETS: &[(&str, &[&str])] = &[
    ("Chest", &["Upper Pectorals", "Lower Pectorals"]),
    ("Back", &["Lats", "Rhomboids", "Trapezius", "Rear Deltoids"]),
    ("Arms", &["Biceps", "Triceps"]),
    ("Shoulders", &["Front Deltoids", "Side Deltoids"]),
    ("Legs", &["Glutes", "Hamstrings", "Quadriceps", "Calves"]),
    ("Core", &["Upper Abs", "Lower Abs", "Obliques"]),
];

pub const EQUIPMENT: &[&str] = &["Barbell", "Dumbbell", "Machine", "Cable", "Bodyweight"];

/// Resolve a target name case-insensitively to its canonical spelling.
pub fn canonical_target(name: &str) -> Option<&'static str> {
    TARGETS
        .iter()
        .map(|(t, _)| *t)
        .find(|t| t.eq_ignore_ascii_case(name))
}

/// Resolve a sub-target, which must belong to `target`.
pub fn canonical_sub_target(target: &str, name: &str) -> Option<&'static str> {
    TARGETS
        .iter()
        .find(|(t, _)| t.eq_ignore_ascii_case(target))
        .and_then(|(_, subs)| subs.iter().copied().find(|s| s.eq_ignore_ascii_case(name)))
}

pub fn canonical_equipment(name: &str) -> Option<&'static str> {
    EQUIPMENT.iter().copied().find(|e| e.eq_ignore_ascii_case(name))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseInfo {
    pub id: i64,
    pub name: String,
    pub target: String,
    pub sub_target: Option<String>,
    pub equipment: String,
}

impl ExerciseInfo {
    /// An empty selection matches everything; a target selection matches
    /// either the exercise's target or its sub-target.
    pub fn matches(&self, targets: &[String], equipment: &[String]) -> bool {
        let target_ok = targets.is_empty()
            || targets.iter().any(|t| {
                t.eq_ignore_ascii_case(&self.target)
                    || self
                        .sub_target
                        .as_deref()
                        .is_some_and(|s| t.eq_ignore_ascii_case(s))
            });
        let equipment_ok =
            equipment.is_empty() || equipment.iter().any(|e| e.eq_ignore_ascii_case(&self.equipment));
        target_ok && equipment_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bench() -> ExerciseInfo {
        ExerciseInfo {
            id: 1,
            name: "Bench Press".into(),
            target: "Chest".into(),
            sub_target: Some("Upper Pectorals".into()),
            equipment: "Barbell".into(),
        }
    }

    #[test]
    fn empty_filters_match_everything() {
        assert!(bench().matches(&[], &[]));
    }

    #[test]
    fn target_filter_accepts_sub_target() {
        let e = bench();
        assert!(e.matches(&["Upper Pectorals".into()], &[]));
        assert!(e.matches(&["chest".into()], &[]));
        assert!(!e.matches(&["Legs".into()], &[]));
    }

    #[test]
    fn both_filters_must_hold() {
        let e = bench();
        assert!(e.matches(&["Chest".into()], &["Barbell".into()]));
        assert!(!e.matches(&["Chest".into()], &["Cable".into()]));
    }

    #[test]
    fn canonical_lookups() {
        assert_eq!(canonical_target("legs"), Some("Legs"));
        assert_eq!(canonical_sub_target("Legs", "calves"), Some("Calves"));
        assert_eq!(canonical_sub_target("Chest", "Calves"), None);
        assert_eq!(canonical_equipment("DUMBBELL"), Some("Dumbbell"));
        assert_eq!(canonical_equipment("kettlebell"), None);
    }
}
