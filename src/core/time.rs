use chrono::{DateTime, NaiveDate, Utc};

use crate::ledger::TransactionId;

/// Clock abstracts access to the current timestamp so the store stays deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current UTC date. Defaults to `now().date_naive()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock backed by [`Utc::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Hands out millisecond-derived ids that never repeat within a process.
///
/// Each id is `max(now_millis, previous + 1)`, so two inserts within the same
/// clock tick, or after the clock steps backwards, still get distinct ids.
#[derive(Debug, Clone, Default)]
pub struct IdSequence {
    last: Option<TransactionId>,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, now: DateTime<Utc>) -> TransactionId {
        let millis = TransactionId::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = match self.last {
            Some(last) => millis.max(last.saturating_add(1)),
            None => millis,
        };
        self.last = Some(id);
        id
    }

    /// Raises the floor so later ids sort after `id`.
    pub fn observe(&mut self, id: TransactionId) {
        self.last = Some(self.last.map_or(id, |last| last.max(id)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn ids_follow_the_clock_when_it_advances() {
        let mut ids = IdSequence::new();
        let first = ids.next(instant());
        let second = ids.next(instant() + Duration::milliseconds(250));
        assert_eq!(first, 1_704_067_200_000);
        assert_eq!(second, first + 250);
    }

    #[test]
    fn ids_stay_unique_within_one_tick() {
        let mut ids = IdSequence::new();
        let a = ids.next(instant());
        let b = ids.next(instant());
        let c = ids.next(instant() - Duration::seconds(5));
        assert!(a < b && b < c);
    }

    #[test]
    fn observe_moves_floor_past_loaded_ids() {
        let mut ids = IdSequence::new();
        ids.observe(2_000_000_000_000);
        ids.observe(10);
        assert_eq!(ids.next(instant()), 2_000_000_000_001);
    }

    #[test]
    fn fixed_clock_reports_its_date() {
        let clock = FixedClock(instant());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }
}
