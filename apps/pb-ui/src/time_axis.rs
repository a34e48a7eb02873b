//! Timestamp <-> plot coordinate mapping. The x axis is measured in days
//! since the Unix epoch.

use chrono::DateTime;
use pb_core::Timestamp;

const SECONDS_PER_DAY: f64 = 86_400.0;

pub fn to_plot_x(t: Timestamp) -> f64 {
    t.and_utc().timestamp() as f64 / SECONDS_PER_DAY
}

pub fn format_plot_x(x: f64) -> String {
    if !x.is_finite() {
        return String::new();
    }
    let secs = (x * SECONDS_PER_DAY).round() as i64;
    DateTime::from_timestamp(secs, 0)
        .map(|dt| pb_app::format_timestamp(dt.naive_utc()))
        .unwrap_or_default()
}

/// Axis tick labels drop the time of day.
pub fn format_plot_tick(x: f64) -> String {
    if !x.is_finite() {
        return String::new();
    }
    let secs = (x * SECONDS_PER_DAY).round() as i64;
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.date_naive().to_string())
        .unwrap_or_default()
}
