use unicode_width::UnicodeWidthStr;

/// Format a duration in seconds as "Hh Mm Ss". Fractions of a second are
/// dropped and every unit is always shown, so zero is "0h 0m 0s".
pub fn format_duration(total_seconds: f64) -> String {
    let total = total_seconds.floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{}h {}m {}s", hours, minutes, seconds)
}

/// Format a weight, trimming a trailing ".0"
pub fn format_weight(weight: f64) -> String {
    if weight == weight.floor() {
        format!("{}", weight as i64)
    } else {
        format!("{:.1}", weight)
    }
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Pad to a display width, counting wide glyphs correctly.
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}
