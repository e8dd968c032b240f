//! Debounced console difficulty switches.
//!
//! The physical switches are emulated with two momentary host buttons: each
//! discrete press toggles the switch once, no matter how long it is held.
//! A settle timer suppresses toggles right after a cartridge load, when the
//! state of the host buttons is not yet meaningful.

/// Seconds after a load during which switch presses are ignored.
pub const SETTLE_SECONDS: f64 = 0.75;

/// Seconds the on-screen indicator stays up after a change.
pub const DISPLAY_SECONDS: f64 = 5.0;

/// When the difficulty indicator is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayPolicy {
    Never,
    #[default]
    WhenChanged,
    Always,
}

#[derive(Clone, Copy, Debug)]
struct Switch {
    /// Hardware bit: true = B (off).
    position: bool,
    held: bool,
}

impl Switch {
    /// Returns true if the switch flipped.
    fn apply(&mut self, raw: bool, armed: bool) -> bool {
        if !armed {
            // Track the level so a press spanning the settle period does
            // not toggle once the timer runs out.
            self.held = raw;
            return false;
        }
        match (raw, self.held) {
            (true, false) => {
                self.position = !self.position;
                self.held = true;
                true
            }
            (true, true) => false,
            (false, _) => {
                self.held = false;
                false
            }
        }
    }
}

/// Left and right difficulty switches with their shared timers.
#[derive(Clone, Debug)]
pub struct DifficultySwitches {
    left: Switch,
    right: Switch,
    settle_frames: u32,
    display_frames: u32,
    display_length: u32,
}

impl DifficultySwitches {
    /// Power-on state for a console running at `frame_rate` Hz: left off,
    /// right on, settle timer armed, indicator hidden.
    pub fn new(frame_rate: f64) -> Self {
        Self {
            left: Switch {
                position: true,
                held: false,
            },
            right: Switch {
                position: false,
                held: true,
            },
            settle_frames: (frame_rate * SETTLE_SECONDS) as u32,
            display_frames: 0,
            display_length: (frame_rate * DISPLAY_SECONDS) as u32,
        }
    }

    /// Restore the power-on state (cartridge load or reset).
    pub fn reset(&mut self, frame_rate: f64) {
        *self = Self::new(frame_rate);
    }

    pub fn settle_expired(&self) -> bool {
        self.settle_frames == 0
    }

    /// Apply one frame of raw switch input.
    ///
    /// Returns the (left, right) hardware bits and whether either changed.
    pub fn apply(&mut self, raw_left: bool, raw_right: bool, settle_expired: bool) -> (bool, bool, bool) {
        let left = self.left.apply(raw_left, settle_expired);
        let right = self.right.apply(raw_right, settle_expired);
        let changed = left || right;
        if changed {
            self.display_frames = self.display_length;
        }
        (self.left.position, self.right.position, changed)
    }

    /// `apply` gated on the internal settle timer.
    pub fn update(&mut self, raw_left: bool, raw_right: bool) -> bool {
        let armed = self.settle_expired();
        self.apply(raw_left, raw_right, armed).2
    }

    /// Count both timers down by one frame.
    pub fn tick(&mut self) {
        self.settle_frames = self.settle_frames.saturating_sub(1);
        self.display_frames = self.display_frames.saturating_sub(1);
    }

    pub fn indicator_visible(&self, policy: DisplayPolicy) -> bool {
        match policy {
            DisplayPolicy::Never => false,
            DisplayPolicy::WhenChanged => self.display_frames > 0,
            DisplayPolicy::Always => true,
        }
    }

    /// Left switch hardware bit (true = B / off).
    pub fn left(&self) -> bool {
        self.left.position
    }

    /// Right switch hardware bit (true = B / off).
    pub fn right(&self) -> bool {
        self.right.position
    }

    pub fn settle_frames(&self) -> u32 {
        self.settle_frames
    }

    pub fn display_frames(&self) -> u32 {
        self.display_frames
    }
}
