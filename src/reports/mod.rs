//! Pure reporting helpers that shape stored workout data for the profile
//! screens: calendar highlights, the rolling weekly histogram, chart scaling
//! and one-rep-max summaries.
//!
//! Nothing here touches the database or the clock; callers pass the data and
//! the reference date in.

pub mod bounds;
pub mod calendar;
pub mod error;
pub mod records;
pub mod weekly;

pub use bounds::compute_display_max;
pub use calendar::build_calendar_marks;
pub use error::ReportError;
pub use records::{best_weight, latest_weight, to_chart_series};
pub use weekly::{bucket_by_week, bucket_by_week_starting, WeekStart, WEEKS_SHOWN};

/// Axis label used by every chart, e.g. `"08 Jun"`.
pub(crate) const LABEL_FORMAT: &str = "%d %b";
