//! Formatting utilities for HUD values.

use std::time::Duration;

/// Format whole seconds as zero-padded `MM:SS`.
///
/// Minutes are not wrapped at an hour, so 75 minutes renders as `75:00`.
pub fn format_clock(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Format a duration as `MM:SS`, dropping sub-second precision.
pub fn format_elapsed(elapsed: Duration) -> String {
    format_clock(elapsed.as_secs())
}

/// Format a countdown given in (possibly fractional or negative) seconds.
pub fn format_countdown(seconds: f32) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format_clock(whole)
}

/// Format a tick rate with one decimal place.
pub fn format_tps(tps: f64) -> String {
    format!("{:.1}", tps)
}
