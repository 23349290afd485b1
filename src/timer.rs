use chrono::Duration;

use crate::clock::Timestamp;

/// A repeating deadline polled from the event loop.
///
/// Nothing fires unless the interval is armed; cancelling it drops the
/// pending deadline so a stale callback can never run.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    period: Duration,
    next_due: Option<Timestamp>,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn every_secs_f64(secs: f64) -> Self {
        Self::new(Duration::milliseconds((secs * 1000.0).round() as i64))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Start counting a full period from `now`. A deadline past the end
    /// of representable time leaves the interval unarmed.
    pub fn arm(&mut self, now: Timestamp) {
        self.next_due = now.checked_add_signed(self.period);
    }

    /// Arm only if not already armed
    pub fn ensure_armed(&mut self, now: Timestamp) {
        if self.next_due.is_none() {
            self.arm(now);
        }
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// Returns how many periods elapsed since the last poll and schedules
    /// the next deadline. Zero when not armed or not yet due.
    pub fn poll(&mut self, now: Timestamp) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };
        if self.period <= Duration::zero() {
            return 0;
        }

        let mut fired = 0;
        while due <= now {
            fired += 1;
            match due.checked_add_signed(self.period) {
                Some(next) => due = next,
                None => {
                    self.next_due = None;
                    return fired;
                }
            }
        }
        self.next_due = Some(due);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};

    #[test]
    fn unarmed_interval_never_fires() {
        let clock = ManualClock::default();
        let mut interval = Interval::new(Duration::seconds(1));
        clock.advance(Duration::seconds(5));
        assert_eq!(interval.poll(clock.now()), 0);
        assert!(!interval.is_armed());
    }

    #[test]
    fn fires_once_per_period() {
        let clock = ManualClock::default();
        let mut interval = Interval::new(Duration::seconds(1));
        interval.arm(clock.now());

        clock.advance(Duration::milliseconds(900));
        assert_eq!(interval.poll(clock.now()), 0);

        clock.advance(Duration::milliseconds(100));
        assert_eq!(interval.poll(clock.now()), 1);
        assert_eq!(interval.poll(clock.now()), 0);

        clock.advance(Duration::milliseconds(2500));
        assert_eq!(interval.poll(clock.now()), 2);
    }

    #[test]
    fn cancel_drops_pending_deadline() {
        let clock = ManualClock::default();
        let mut interval = Interval::every_secs_f64(3.0);
        interval.arm(clock.now());
        clock.advance(Duration::seconds(2));
        interval.cancel();
        clock.advance(Duration::seconds(5));
        assert_eq!(interval.poll(clock.now()), 0);
    }

    #[test]
    fn rearming_restarts_the_period() {
        let clock = ManualClock::default();
        let mut interval = Interval::every_secs_f64(3.0);
        interval.arm(clock.now());
        clock.advance(Duration::seconds(2));
        interval.arm(clock.now());
        clock.advance(Duration::seconds(2));
        assert_eq!(interval.poll(clock.now()), 0);
        clock.advance(Duration::seconds(1));
        assert_eq!(interval.poll(clock.now()), 1);
    }

    #[test]
    fn ensure_armed_keeps_existing_deadline() {
        let clock = ManualClock::default();
        let mut interval = Interval::new(Duration::seconds(1));
        interval.ensure_armed(clock.now());
        clock.advance(Duration::milliseconds(600));
        interval.ensure_armed(clock.now());
        clock.advance(Duration::milliseconds(400));
        assert_eq!(interval.poll(clock.now()), 1);
    }

    #[test]
    fn zero_period_is_inert() {
        let clock = ManualClock::default();
        let mut interval = Interval::new(Duration::zero());
        interval.arm(clock.now());
        clock.advance(Duration::seconds(1));
        assert_eq!(interval.poll(clock.now()), 0);
    }

    #[test]
    fn deadline_beyond_calendar_stays_unarmed() {
        let clock = ManualClock::default();
        let mut interval = Interval::every_secs_f64(1e13);
        interval.arm(clock.now());
        assert!(!interval.is_armed());
        clock.advance(Duration::seconds(10));
        assert_eq!(interval.poll(clock.now()), 0);

        let mut longest = Interval::new(Duration::milliseconds(i64::MAX));
        longest.ensure_armed(clock.now());
        assert!(!longest.is_armed());
    }
}
