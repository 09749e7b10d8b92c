#![forbid(unsafe_code)]

//! Frame timing for hosts that drive the sheet from wall-clock instants.
//!
//! Uses `web_time` so the same code runs on wasm hosts.

use std::time::Duration;

use web_time::Instant;

/// Longest frame fed to the spring in one tick. Longer gaps (a backgrounded
/// tab, a debugger pause) are truncated.
pub const MAX_FRAME: Duration = Duration::from_millis(100);

/// Converts successive frame instants into tick durations.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    /// Clock with no frame observed yet.
    #[must_use]
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Time since the previous frame, capped at [`MAX_FRAME`].
    ///
    /// The first frame yields zero.
    pub fn frame(&mut self, now: Instant) -> Duration {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).min(MAX_FRAME),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        dt
    }

    /// Forget the previous frame, e.g. when animation resumes after idling.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_zero_then_deltas() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        assert_eq!(clock.frame(t0), Duration::ZERO);
        assert_eq!(
            clock.frame(t0 + Duration::from_millis(16)),
            Duration::from_millis(16)
        );
    }

    #[test]
    fn long_gaps_are_capped() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.frame(t0);
        assert_eq!(clock.frame(t0 + Duration::from_secs(5)), MAX_FRAME);
    }

    #[test]
    fn reset_forgets_last_frame() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.frame(t0);
        clock.reset();
        assert_eq!(clock.frame(t0 + Duration::from_secs(1)), Duration::ZERO);
    }

    #[test]
    fn backwards_time_is_zero() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now() + Duration::from_secs(1);
        clock.frame(t0);
        assert_eq!(clock.frame(t0 - Duration::from_millis(10)), Duration::ZERO);
    }
}
