pub mod chart;
pub mod exercise;
pub mod profile;
pub mod record;
pub mod routine;
pub mod workout;

pub use chart::{CalendarMark, CalendarMarks, ChartPoint};
pub use exercise::ExerciseInfo;
pub use profile::Profile;
pub use record::{RepMax, WeightRecord};
pub use routine::{Exercise, Routine, Set, SetOverride};
pub use workout::WorkoutRecord;
