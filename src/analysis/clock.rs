//! Wall-clock parsing for simulation log timestamps.

/// Minutes in one day, added when an interval crosses midnight.
pub const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

/// Parses an `H:MM:SS` time into minutes since midnight.
///
/// Returns `None` unless the text has exactly three integer fields.
///
/// # Examples
///
/// ```
/// use swapdash::analysis::clock::minutes_of_day;
///
/// assert_eq!(minutes_of_day("7:30:30"), Some(450.5));
/// assert_eq!(minutes_of_day("7:30"), None);
/// ```
pub fn minutes_of_day(text: &str) -> Option<f64> {
    let mut parts = text.trim().split(':');
    let hours: u32 = parts.next()?.trim().parse().ok()?;
    let minutes: u32 = parts.next()?.trim().parse().ok()?;
    let seconds: u32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(f64::from(hours) * 60.0 + f64::from(minutes) + f64::from(seconds) / 60.0)
}

/// Elapsed minutes from `start` to `end`, wrapping once past midnight.
pub fn elapsed_minutes(start: f64, end: f64) -> f64 {
    let elapsed = end - start;
    if elapsed < 0.0 {
        elapsed + MINUTES_PER_DAY
    } else {
        elapsed
    }
}
