//! Caller-owned countdown cadence.
//!
//! The engine never registers timers. The event loop owns a [`Countdown`],
//! arms it when a question is shown and asks it whether a tick is due each
//! time round. At most one countdown is ever armed: arming replaces the
//! previous schedule, and a disarmed countdown never reports a tick.

use std::time::{Duration, Instant};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct Countdown {
    period: Duration,
    next_due: Option<Instant>,
}

impl Countdown {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Schedule the first tick one period after `now`, dropping any earlier
    /// schedule.
    pub fn arm(&mut self, now: Instant) {
        self.cancel();
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Consume one due tick, if any.
    ///
    /// Call in a loop to catch up after a long stall; each call moves the
    /// schedule forward by exactly one period.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if due <= now => {
                self.next_due = Some(due + self.period);
                true
            }
            _ => false,
        }
    }

    /// How long the event loop may block before the next tick, capped at
    /// `idle` (also returned when disarmed).
    pub fn timeout(&self, now: Instant, idle: Duration) -> Duration {
        match self.next_due {
            Some(due) => due.saturating_duration_since(now).min(idle),
            None => idle,
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDLE: Duration = Duration::from_millis(250);

    #[test]
    fn test_disarmed_never_ticks() {
        let mut countdown = Countdown::default();
        let now = Instant::now();
        assert!(!countdown.is_armed());
        assert!(!countdown.take_due(now + Duration::from_secs(60)));
        assert_eq!(countdown.timeout(now, IDLE), IDLE);
    }

    #[test]
    fn test_ticks_once_per_period() {
        let mut countdown = Countdown::default();
        let start = Instant::now();
        countdown.arm(start);

        assert!(!countdown.take_due(start + Duration::from_millis(999)));
        assert!(countdown.take_due(start + Duration::from_secs(1)));
        assert!(!countdown.take_due(start + Duration::from_millis(1500)));
        assert!(countdown.take_due(start + Duration::from_secs(2)));
    }

    #[test]
    fn test_catches_up_after_stall() {
        let mut countdown = Countdown::default();
        let start = Instant::now();
        countdown.arm(start);

        let later = start + Duration::from_millis(3500);
        let mut ticks = 0;
        while countdown.take_due(later) {
            ticks += 1;
        }
        assert_eq!(ticks, 3);
    }

    #[test]
    fn test_rearm_replaces_schedule() {
        let mut countdown = Countdown::default();
        let start = Instant::now();
        countdown.arm(start);
        countdown.arm(start + Duration::from_millis(800));

        assert!(!countdown.take_due(start + Duration::from_secs(1)));
        assert!(countdown.take_due(start + Duration::from_millis(1800)));
    }

    #[test]
    fn test_cancel_stops_ticks() {
        let mut countdown = Countdown::default();
        let start = Instant::now();
        countdown.arm(start);
        countdown.cancel();

        assert!(!countdown.is_armed());
        assert!(!countdown.take_due(start + Duration::from_secs(5)));
    }

    #[test]
    fn test_timeout_until_next_tick() {
        let mut countdown = Countdown::default();
        let start = Instant::now();
        countdown.arm(start);

        assert_eq!(
            countdown.timeout(start + Duration::from_millis(900), IDLE),
            Duration::from_millis(100)
        );
        assert_eq!(countdown.timeout(start, IDLE), IDLE);
        assert_eq!(
            countdown.timeout(start + Duration::from_secs(3), IDLE),
            Duration::ZERO
        );
    }
}
