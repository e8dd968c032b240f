use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Remaining time below which `SystemClock` spins instead of sleeping.
const SPIN_THRESHOLD: Duration = Duration::from_millis(2);

/// Shared stop request. Cloning yields a handle to the same flag, so a
/// host thread can stop a loop running elsewhere.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The deadline was reached.
    Due,
    /// The token was cancelled before the deadline.
    Cancelled,
}

/// Monotonic time source with a cancellable wait.
pub trait Clock {
    /// Time since the clock's origin.
    fn now(&self) -> Duration;

    /// Block until `deadline` (relative to the origin) or cancellation.
    fn wait_until(&mut self, deadline: Duration, cancel: &CancelToken) -> WaitOutcome;
}

/// Wall clock: sleeps for the bulk of a wait and spins the remainder.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn wait_until(&mut self, deadline: Duration, cancel: &CancelToken) -> WaitOutcome {
        loop {
            if cancel.is_cancelled() {
                return WaitOutcome::Cancelled;
            }
            let now = self.now();
            if now >= deadline {
                return WaitOutcome::Due;
            }
            let remaining = deadline - now;
            if remaining > SPIN_THRESHOLD {
                std::thread::sleep(remaining - SPIN_THRESHOLD);
            } else {
                std::hint::spin_loop();
            }
        }
    }
}

/// Deterministic clock: time only moves when advanced explicitly or when
/// a wait jumps to its deadline.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Duration,
    waits: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Number of waits that reached their deadline.
    pub fn waits(&self) -> u64 {
        self.waits
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn wait_until(&mut self, deadline: Duration, cancel: &CancelToken) -> WaitOutcome {
        if cancel.is_cancelled() {
            return WaitOutcome::Cancelled;
        }
        self.now = self.now.max(deadline);
        self.waits += 1;
        WaitOutcome::Due
    }
}
