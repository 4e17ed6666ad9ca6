//! Focus interval records.
//!
//! A focus interval is a bounded work session tied to one task. It is
//! created active with `end_time = start_time + duration` and transitions to
//! completed exactly once, either by an explicit stop (which overwrites
//! `end_time` with the stop instant) or by lazy expiry (which leaves
//! `end_time` at the originally computed instant).

pub mod engine;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use engine::FocusEngine;

/// Default focus duration in minutes when the caller supplies none.
pub const DEFAULT_DURATION_MIN: u32 = 25;

/// A time-boxed work session tied to one task.
///
/// Timestamps carry microsecond precision; the store truncates finer
/// components on write so records round-trip bit-exact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FocusInterval {
    /// Store-assigned id.
    pub id: i64,
    /// Referenced task. Validated at creation only -- the task may be
    /// deleted later while this record remains.
    pub task_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// False while active, true once stopped or expired. Terminal.
    pub completed: bool,
    /// Requested duration in minutes.
    pub duration_min: u32,
}

impl FocusInterval {
    /// Whether the interval counts as active at `now`.
    ///
    /// The boundary is exclusive on the active side: an interval whose
    /// `end_time` equals `now` is expired, not active.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.end_time > now
    }

    /// Elapsed whole seconds between start and end, truncated (never
    /// rounded up), clamped at zero.
    pub fn elapsed_secs(&self) -> u64 {
        (self.end_time - self.start_time).num_seconds().max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn interval(start: DateTime<Utc>, end: DateTime<Utc>, completed: bool) -> FocusInterval {
        FocusInterval {
            id: 1,
            task_id: 1,
            start_time: start,
            end_time: end,
            completed,
            duration_min: 25,
        }
    }

    #[test]
    fn active_boundary_is_exclusive() {
        let start = Utc.with_ymd_and_hms(2025, 1, 9, 12, 0, 0).unwrap();
        let end = start + chrono::Duration::minutes(25);
        let it = interval(start, end, false);

        assert!(it.is_active_at(end - chrono::Duration::microseconds(1)));
        // end_time == now counts as expired.
        assert!(!it.is_active_at(end));
        assert!(!it.is_active_at(end + chrono::Duration::seconds(1)));
    }

    #[test]
    fn completed_is_never_active() {
        let start = Utc.with_ymd_and_hms(2025, 1, 9, 12, 0, 0).unwrap();
        let it = interval(start, start + chrono::Duration::minutes(25), true);
        assert!(!it.is_active_at(start));
    }

    #[test]
    fn elapsed_secs_truncates_fractional_seconds() {
        let start = Utc.with_ymd_and_hms(2025, 1, 9, 12, 0, 0).unwrap();
        let end = start + chrono::Duration::seconds(90) + chrono::Duration::microseconds(999_999);
        assert_eq!(interval(start, end, true).elapsed_secs(), 90);
    }

    #[test]
    fn timestamps_roundtrip_through_json() {
        let start = Utc.with_ymd_and_hms(2025, 1, 9, 12, 0, 0).unwrap()
            + chrono::Duration::microseconds(123_456);
        let it = interval(start, start + chrono::Duration::minutes(25), false);
        let json = serde_json::to_string(&it).unwrap();
        let back: FocusInterval = serde_json::from_str(&json).unwrap();
        assert_eq!(back, it);
    }
}
