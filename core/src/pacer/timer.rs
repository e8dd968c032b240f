use std::time::Duration;

use super::clock::{CancelToken, Clock, WaitOutcome};

/// Slowest tick rate the timer accepts.
pub const MIN_RATE_HZ: f64 = 1.0;

/// Whether `rate_hz` can drive a `FrameTimer`.
pub fn valid_rate(rate_hz: f64) -> bool {
    rate_hz.is_finite() && rate_hz >= MIN_RATE_HZ
}

/// Real-time frame tick.
///
/// Ticks are spaced one period apart. When a frame overruns, the next tick
/// is scheduled a full period after the late one instead of being pulled
/// forward, so the loop never bursts to catch up.
#[derive(Clone, Debug)]
pub struct FrameTimer {
    period: Duration,
    next_tick: Duration,
    halted: bool,
}

impl FrameTimer {
    /// Timer ticking at `rate_hz`, which must satisfy [`valid_rate`].
    pub fn new(rate_hz: f64) -> Self {
        Self {
            period: Duration::from_secs_f64(1.0 / rate_hz),
            next_tick: Duration::ZERO,
            halted: true,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn next_tick(&self) -> Duration {
        self.next_tick
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Restart the tick sequence from `now`.
    pub fn reset(&mut self, now: Duration) {
        self.next_tick = now + self.period;
        self.halted = false;
    }

    /// Stop the timer; it stays halted until the next `reset`.
    pub fn halt(&mut self) {
        self.halted = true;
    }

    /// Wait for the next tick and schedule the one after it.
    pub fn wait(&mut self, clock: &mut impl Clock, cancel: &CancelToken) -> WaitOutcome {
        if self.halted {
            self.reset(clock.now());
        }
        let outcome = clock.wait_until(self.next_tick, cancel);
        let now = clock.now();
        self.next_tick += self.period;
        if self.next_tick <= now {
            self.next_tick = now + self.period;
        }
        outcome
    }
}
