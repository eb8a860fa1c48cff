use bevy::prelude::*;
use chrono::{DateTime, NaiveDate, Utc};

/// Decides what "now" and "today" mean for the session.
///
/// Unpinned it follows the wall clock. Tests and replays pin it so daily
/// summaries are reproducible.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionClock {
    pinned: Option<DateTime<Utc>>,
}

impl SessionClock {
    pub fn pinned(at: DateTime<Utc>) -> Self {
        Self { pinned: Some(at) }
    }

    pub fn pin(&mut self, at: DateTime<Utc>) {
        self.pinned = Some(at);
    }

    pub fn unpin(&mut self) {
        self.pinned = None;
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned.is_some()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.pinned.unwrap_or_else(Utc::now)
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_pinned_clock_is_stable() {
        let at = Utc.with_ymd_and_hms(2025, 11, 3, 9, 30, 0).unwrap();
        let clock = SessionClock::pinned(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 11, 3).unwrap());
    }

    #[test]
    fn test_unpinned_clock_follows_wall_time() {
        let mut clock = SessionClock::pinned(Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap());
        clock.unpin();
        assert!(!clock.is_pinned());
        assert!(clock.now().date_naive() > NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }
}
