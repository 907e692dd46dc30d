//! Reunion countdown arithmetic.
//!
//! The target instant is derived once from the configured relationship-start
//! date plus an offset in days, and every tick decomposes `target - now` into
//! whole days/hours/minutes/seconds. All computation is in UTC.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Whole-unit decomposition of a non-negative duration.
///
/// Invariant: the four fields are always a consistent decomposition of a
/// single millisecond distance. Once the target has passed, every field is
/// zero and stays zero for all later `now` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRemaining {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeRemaining {
    pub const ZERO: TimeRemaining = TimeRemaining {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    pub fn is_complete(&self) -> bool {
        *self == TimeRemaining::ZERO
    }
}

/// Derive the target instant: UTC midnight of `start + offset_days`.
///
/// Returns `None` only when the addition leaves chrono's representable date
/// range; callers treat that as a configuration error.
pub fn reunion_target(start: NaiveDate, offset_days: u32) -> Option<DateTime<Utc>> {
    let date = start.checked_add_days(Days::new(u64::from(offset_days)))?;
    Some(date.and_time(NaiveTime::MIN).and_utc())
}

/// Compute the remaining time until `target`.
///
/// `distance = target - now`; a distance at or past zero yields the all-zero
/// value. Otherwise successive floor division: days, then hours, minutes and
/// seconds out of the remainder.
pub fn time_remaining(target: DateTime<Utc>, now: DateTime<Utc>) -> TimeRemaining {
    let distance = (target - now).num_milliseconds();
    if distance <= 0 {
        return TimeRemaining::ZERO;
    }

    TimeRemaining {
        days: (distance / MS_PER_DAY) as u64,
        hours: (distance % MS_PER_DAY / MS_PER_HOUR) as u64,
        minutes: (distance % MS_PER_HOUR / MS_PER_MINUTE) as u64,
        seconds: (distance % MS_PER_MINUTE / MS_PER_SECOND) as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn decomposes_day_and_a_half() {
        let target = utc(2025, 1, 1, 0, 0, 0);
        let now = utc(2024, 12, 30, 12, 0, 0);
        let remaining = time_remaining(target, now);
        assert_eq!(
            remaining,
            TimeRemaining { days: 1, hours: 12, minutes: 0, seconds: 0 }
        );
        assert!(!remaining.is_complete());
    }

    #[test]
    fn exact_day_offsets_have_no_subday_parts() {
        let now = utc(2025, 3, 10, 8, 30, 45);
        for d in [0u64, 1, 7, 50, 365] {
            let target = now + chrono::Duration::days(d as i64);
            let remaining = time_remaining(target, now);
            assert_eq!(remaining.days, d);
            assert_eq!(remaining.hours, 0);
            assert_eq!(remaining.minutes, 0);
            assert_eq!(remaining.seconds, 0);
        }
    }

    #[test]
    fn clamps_to_zero_once_target_passed() {
        let target = utc(2025, 1, 1, 0, 0, 0);
        assert_eq!(time_remaining(target, target), TimeRemaining::ZERO);

        // Stays zero for every later instant.
        for hours_past in [1, 24, 24 * 400] {
            let later = target + chrono::Duration::hours(hours_past);
            let remaining = time_remaining(target, later);
            assert!(remaining.is_complete());
        }
    }

    #[test]
    fn sub_second_distance_rounds_down_to_zero_seconds() {
        let target = utc(2025, 1, 1, 0, 0, 0);
        let now = target - chrono::Duration::milliseconds(999);
        assert_eq!(time_remaining(target, now), TimeRemaining::ZERO);
    }

    #[test]
    fn target_is_midnight_of_start_plus_offset() {
        let start = NaiveDate::from_ymd_opt(2025, 9, 7).unwrap();
        let target = reunion_target(start, 150).unwrap();
        assert_eq!(target, utc(2026, 2, 4, 0, 0, 0));
    }

    #[test]
    fn target_overflow_is_reported() {
        assert!(reunion_target(NaiveDate::MAX, 1).is_none());
    }
}
