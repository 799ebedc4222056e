//! Reusable formatting utilities for CLI output
//!
//! Dates and relative times shown in activation and user listings.

use chrono::{DateTime, Utc};

/// Calendar date of an expiry, e.g. `2026-03-01`
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Time until (or since) `at`, relative to `now`.
///
/// # Example output
/// - `in 45d`
/// - `in 5h`
/// - `3d ago`
pub fn format_relative(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = at.signed_duration_since(now);
    let future = delta.num_seconds() >= 0;
    let delta = delta.abs();

    let amount = if delta.num_days() > 0 {
        format!("{}d", delta.num_days())
    } else if delta.num_hours() > 0 {
        format!("{}h", delta.num_hours())
    } else {
        format!("{}m", delta.num_minutes())
    };

    if future {
        format!("in {}", amount)
    } else {
        format!("{} ago", amount)
    }
}
