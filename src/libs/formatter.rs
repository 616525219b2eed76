//! Duration formatting for tables and the status line.
//!
//! Two shapes are used across the application:
//!
//! - `HH:MM` ([`format_duration`]) for table columns, where alignment matters.
//! - `H:MM` ([`format_hours_minutes`]) for the status text, e.g. `"3:05 left"`.
//!
//! Seconds are truncated and negative durations render as zero in both.
//!
//! ```rust
//! use worktrack::libs::formatter::{format_duration, format_hours_minutes};
//! use chrono::Duration;
//!
//! assert_eq!(format_duration(&Duration::minutes(90)), "01:30");
//! assert_eq!(format_hours_minutes(&Duration::minutes(65)), "1:05");
//! ```

use chrono::{Duration, NaiveDateTime};

/// Formats a duration as zero-padded `HH:MM`.
///
/// ```rust
/// use worktrack::libs::formatter::format_duration;
/// use chrono::Duration;
///
/// assert_eq!(format_duration(&Duration::hours(8)), "08:00");
/// assert_eq!(format_duration(&Duration::zero()), "00:00");
/// assert_eq!(format_duration(&Duration::hours(-1)), "00:00");
/// assert_eq!(format_duration(&Duration::hours(24)), "24:00");
/// ```
pub fn format_duration(duration: &Duration) -> String {
    let (hours, mins) = split(duration);
    format!("{:02}:{:02}", hours, mins)
}

/// Formats a duration as `H:MM` with unpadded hours.
pub fn format_hours_minutes(duration: &Duration) -> String {
    let (hours, mins) = split(duration);
    format!("{}:{:02}", hours, mins)
}

/// Hours as a decimal with one fractional digit, e.g. `"7.5"`.
pub fn format_hours(hours: f64) -> String {
    format!("{:.1}", hours.max(0.0))
}

/// Progress ratio as a whole percentage, e.g. `0.456` becomes `"45%"`.
pub fn format_percent(progress: f64) -> String {
    format!("{}%", (progress.max(0.0) * 100.0).floor() as u64)
}

/// `HH:MM` clock time, or `-` for a missing timestamp.
pub fn format_time(at: Option<NaiveDateTime>) -> String {
    at.map(|t| t.format("%H:%M").to_string()).unwrap_or_else(|| "-".to_string())
}

fn split(duration: &Duration) -> (i64, i64) {
    if *duration < Duration::zero() {
        return (0, 0);
    }
    (duration.num_hours(), duration.num_minutes() % 60)
}
