//! Movement domain: monotonic simulation clock for grace windows.

/// Seconds on a [`SimClock`]. Double precision keeps sub-step windows exact
/// for sessions far longer than a level run.
pub type Stamp = f64;

/// Monotonic clock advanced only by simulation steps.
///
/// Grace windows (jump buffer, coyote time, wall slide leeways) compare
/// recorded stamps against this clock, so a test driving the core with a
/// fixed `dt` observes exactly the same timings every run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    now: Stamp,
}

impl SimClock {
    pub fn starting_at(now: Stamp) -> Self {
        Self { now }
    }

    pub fn now(&self) -> Stamp {
        self.now
    }

    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.now += f64::from(dt);
        }
    }

    /// True while `now < stamp + window`. A stamp that was never recorded is
    /// never inside its window.
    pub fn within(&self, stamp: Option<Stamp>, window: f32) -> bool {
        stamp.is_some_and(|t| self.now < t + f64::from(window))
    }

    /// True once `now > stamp + interval`, or if the stamp was never recorded.
    pub fn elapsed_since(&self, stamp: Option<Stamp>, interval: f32) -> bool {
        stamp.is_none_or(|t| self.now > t + f64::from(interval))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_is_strict_at_window_end() {
        let mut clock = SimClock::starting_at(1.0);
        assert!(clock.within(Some(1.0), 0.5));
        clock.advance(0.5);
        assert!(!clock.within(Some(1.0), 0.5));
        assert!(!clock.within(None, 10.0));
    }

    #[test]
    fn test_elapsed_since_unrecorded_stamp() {
        let clock = SimClock::default();
        assert!(clock.elapsed_since(None, 0.2));
        assert!(!clock.elapsed_since(Some(0.0), 0.2));
    }

    #[test]
    fn test_advance_ignores_bad_dt() {
        let mut clock = SimClock::starting_at(2.0);
        clock.advance(-1.0);
        clock.advance(f32::NAN);
        assert_eq!(clock.now(), 2.0);
    }

    #[test]
    fn test_windows_stay_exact_late_in_a_long_session() {
        // Eleven days of uptime at 64 Hz
        let mut clock = SimClock::starting_at(1_000_000.0);
        let stamp = Some(clock.now());
        for _ in 0..5 {
            clock.advance(1.0 / 64.0);
        }
        assert!(clock.within(stamp, 0.08));
        clock.advance(1.0 / 64.0);
        assert!(!clock.within(stamp, 0.08));
        assert_eq!(clock.now() - 1_000_000.0, 6.0 / 64.0);
    }
}
