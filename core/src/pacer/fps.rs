use std::time::Duration;

/// Achieved frame rate: frames presented since the baseline divided by the
/// real time elapsed since it.
#[derive(Clone, Debug, Default)]
pub struct FpsCounter {
    frames: u64,
    since: Duration,
    fps: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new measurement window at `now`.
    pub fn reset(&mut self, now: Duration) {
        self.frames = 0;
        self.since = now;
        self.fps = 0.0;
    }

    pub fn record_frame(&mut self, now: Duration) {
        self.frames += 1;
        let elapsed = now.saturating_sub(self.since).as_secs_f64();
        if elapsed > 0.0 {
            self.fps = (self.frames as f64 / elapsed) as f32;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}
