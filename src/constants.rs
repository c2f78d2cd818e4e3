//! Shared constants for calendar rendering.

/// Maximum merged display entries per day cell. A cell only ever shows a
/// few icons; overflow is a display concern, not data loss.
pub const MAX_DAY_EVENTS: usize = 4;

/// How far ahead the sidebar looks for upcoming transitions, in days.
pub const UPCOMING_WINDOW_DAYS: i64 = 14;

/// Hour-of-day used to sample custody ownership clear of the handover hour.
pub const NOON_HOUR: u32 = 12;
