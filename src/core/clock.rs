//! Time source for entry ids.

use chrono::Utc;

use crate::core::entry::EntryId;

/// Supplies the current time in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Next id to hand out: the current millisecond, bumped past `last` so
/// entries created within the same millisecond (or after the wall clock
/// stepped backwards) still get distinct, increasing keys.
///
/// `None` when `last` is already `EntryId::MAX` and no larger id exists.
pub fn next_id(now: i64, last: Option<EntryId>) -> Option<EntryId> {
    match last {
        Some(last) if now <= last => last.checked_add(1),
        _ => Some(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id_uses_clock_when_ahead() {
        assert_eq!(next_id(1_000, None), Some(1_000));
        assert_eq!(next_id(1_000, Some(999)), Some(1_000));
    }

    #[test]
    fn test_next_id_bumps_on_same_millisecond() {
        assert_eq!(next_id(1_000, Some(1_000)), Some(1_001));
    }

    #[test]
    fn test_next_id_bumps_when_clock_goes_backwards() {
        assert_eq!(next_id(900, Some(1_000)), Some(1_001));
    }

    #[test]
    fn test_next_id_exhausted_at_max() {
        assert_eq!(next_id(1_000, Some(EntryId::MAX)), None);
        assert_eq!(next_id(EntryId::MAX, Some(EntryId::MAX - 1)), Some(EntryId::MAX));
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }
}
