//! Small arithmetic and formatting helpers shared by the session, the
//! statistics summary and the results report.

/// `part / whole` as a percentage rounded to the nearest integer.
///
/// Returns 0 when `whole` is 0.
pub fn round_percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

/// Format a duration in milliseconds as `m:ss`.
pub fn format_elapsed(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    format!("{minutes}:{seconds:02}")
}

/// Questions per minute over `elapsed_ms`, with one decimal.
///
/// `"0.0"` when no time has elapsed.
pub fn questions_per_minute(total: usize, elapsed_ms: u64) -> String {
    let minutes = elapsed_ms as f64 / 60_000.0;
    if minutes <= 0.0 {
        return "0.0".to_string();
    }
    format!("{:.1}", total as f64 / minutes)
}
