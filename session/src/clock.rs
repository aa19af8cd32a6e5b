//! Countdown clock implementing the session's time economy.

use std::time::Duration;

const SECOND: Duration = Duration::from_secs(1);

/// Single countdown value with capped gains and a zero floor.
///
/// The clock only moves in whole seconds; sub-second tick remainders
/// accumulate internally until a full second has elapsed.
#[derive(Clone, Debug)]
pub(crate) struct Clock {
    remaining: u32,
    cap: u32,
    fraction: Duration,
}

impl Clock {
    pub(crate) fn new(start: u32, cap: u32) -> Self {
        Self {
            remaining: start.min(cap),
            cap,
            fraction: Duration::ZERO,
        }
    }

    pub(crate) fn remaining(&self) -> u32 {
        self.remaining
    }

    pub(crate) fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Folds a tick delta into the fractional accumulator and returns the
    /// number of whole seconds that elapsed.
    pub(crate) fn accumulate(&mut self, dt: Duration) -> u32 {
        self.fraction = self.fraction.saturating_add(dt);
        let mut seconds = 0;
        while self.fraction >= SECOND {
            self.fraction -= SECOND;
            seconds += 1;
        }
        seconds
    }

    /// Credits whole seconds, clamped at the cap. Returns the applied delta.
    pub(crate) fn credit(&mut self, seconds: u32) -> i32 {
        let before = self.remaining;
        self.remaining = self.remaining.saturating_add(seconds).min(self.cap);
        (self.remaining - before) as i32
    }

    /// Debits whole seconds, clamped at zero. Returns the applied delta.
    pub(crate) fn debit(&mut self, seconds: u32) -> i32 {
        let before = self.remaining;
        self.remaining = self.remaining.saturating_sub(seconds);
        -((before - self.remaining) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credits_clamp_at_cap() {
        let mut clock = Clock::new(55, 60);
        assert_eq!(clock.credit(10), 5);
        assert_eq!(clock.remaining(), 60);
        assert_eq!(clock.credit(10), 0);
        assert_eq!(clock.remaining(), 60);
    }

    #[test]
    fn debits_clamp_at_zero() {
        let mut clock = Clock::new(3, 60);
        assert_eq!(clock.debit(5), -3);
        assert_eq!(clock.remaining(), 0);
        assert!(clock.is_expired());
        assert_eq!(clock.debit(5), 0);
    }

    #[test]
    fn remains_in_range_under_arbitrary_mutation() {
        let mut clock = Clock::new(30, 60);
        let mutations: [(bool, u32); 8] = [
            (true, 50),
            (false, 7),
            (true, 3),
            (false, 100),
            (true, 200),
            (false, 1),
            (true, 0),
            (false, 60),
        ];
        for (gain, amount) in mutations {
            if gain {
                let _ = clock.credit(amount);
            } else {
                let _ = clock.debit(amount);
            }
            assert!(clock.remaining() <= 60);
        }
    }

    #[test]
    fn accumulates_whole_seconds_only() {
        let mut clock = Clock::new(60, 60);
        assert_eq!(clock.accumulate(Duration::from_millis(400)), 0);
        assert_eq!(clock.accumulate(Duration::from_millis(600)), 1);
        assert_eq!(clock.accumulate(Duration::from_millis(2_500)), 2);
        assert_eq!(clock.accumulate(Duration::from_millis(500)), 1);
    }
}
