//! Host-driven timers.
//!
//! Nothing here reads a clock. The host reports elapsed time through
//! `advance`, which keeps every widget deterministic under test.

use std::time::Duration;

/// One-shot timer. Restarting it while pending pushes the deadline out,
/// which makes it a debouncer as well as a plain delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    delay: Duration,
    remaining: Option<Duration>,
}

impl Timer {
    /// Create an idle timer.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            remaining: None,
        }
    }

    /// Start or restart the countdown.
    pub fn restart(&mut self) {
        self.remaining = Some(self.delay);
    }

    /// Stop without firing.
    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    /// Whether a countdown is running.
    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Let time pass. Returns true exactly once, when the countdown ends.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        match self.remaining {
            Some(remaining) if elapsed >= remaining => {
                self.remaining = None;
                true
            }
            Some(remaining) => {
                self.remaining = Some(remaining - elapsed);
                false
            }
            None => false,
        }
    }
}

/// Repeating timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    period: Duration,
    elapsed: Duration,
}

impl Interval {
    /// Create an interval; a zero period is bumped to one millisecond.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Restart the current period from zero.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// Let time pass. Returns how many periods completed, capped at
    /// `u32::MAX`.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        const NANOS_PER_SEC: u128 = 1_000_000_000;

        let total = self.elapsed.saturating_add(elapsed).as_nanos();
        let period = self.period.as_nanos();
        let rest = total % period;
        self.elapsed = Duration::new(
            u64::try_from(rest / NANOS_PER_SEC).unwrap_or(u64::MAX),
            (rest % NANOS_PER_SEC) as u32,
        );
        u32::try_from(total / period).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_timer_fires_once() {
        let mut timer = Timer::new(ms(200));
        assert!(!timer.advance(ms(500)));

        timer.restart();
        assert!(!timer.advance(ms(150)));
        assert!(timer.advance(ms(50)));
        assert!(!timer.advance(ms(500)));
    }

    #[test]
    fn test_timer_restart_debounces() {
        let mut timer = Timer::new(ms(200));
        timer.restart();
        assert!(!timer.advance(ms(150)));
        timer.restart();
        assert!(!timer.advance(ms(150)));
        assert!(timer.advance(ms(50)));
    }

    #[test]
    fn test_timer_cancel() {
        let mut timer = Timer::new(ms(100));
        timer.restart();
        timer.cancel();
        assert!(!timer.is_pending());
        assert!(!timer.advance(ms(100)));
    }

    #[test]
    fn test_interval_counts_periods() {
        let mut interval = Interval::new(ms(1000));
        assert_eq!(interval.advance(ms(999)), 0);
        assert_eq!(interval.advance(ms(1)), 1);
        assert_eq!(interval.advance(ms(2500)), 2);
        interval.reset();
        assert_eq!(interval.advance(ms(600)), 0);
    }

    #[test]
    fn test_interval_huge_elapsed_saturates() {
        let mut interval = Interval::new(ms(1));
        assert_eq!(interval.advance(Duration::MAX), u32::MAX);
        assert_eq!(interval.advance(Duration::MAX), u32::MAX);
        assert_eq!(interval.advance(Duration::ZERO), 0);

        interval.reset();
        assert_eq!(interval.advance(ms(3)), 3);
    }
}
