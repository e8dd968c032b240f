//! Per-cartridge input session.
//!
//! Owns the input vector, the peripheral selected for each port and the
//! difficulty switches. The main loop holds exactly one session and resets
//! it whenever a cartridge is (re)loaded.

use log::info;

use crate::core::cartridge::CartridgeInfo;
use crate::core::host::Overlay;
use crate::core::timing::VideoTiming;
use crate::input::difficulty::{DifficultySwitches, DisplayPolicy};
use crate::input::lightgun::LightgunMapper;
use crate::input::peripheral::Peripheral;
use crate::input::raw::RawInput;
use crate::input::translator::translate;
use crate::input::vector::{InputVector, Slot};

/// User-facing input settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputOptions {
    /// Exchange the two fire buttons on both ports.
    pub swap_buttons: bool,
    /// Allow toggling the difficulty switches from the host.
    pub difficulty_switches: bool,
    pub difficulty_display: DisplayPolicy,
    /// Draw the light-gun reticle.
    pub lightgun_crosshair: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            swap_buttons: false,
            difficulty_switches: true,
            difficulty_display: DisplayPolicy::WhenChanged,
            lightgun_crosshair: true,
        }
    }
}

/// Host requests raised while refreshing the input vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameEvents {
    pub pause: bool,
    pub quit: bool,
}

pub struct Session {
    vector: InputVector,
    ports: [Peripheral; 2],
    difficulty: DifficultySwitches,
    options: InputOptions,
}

impl Session {
    /// A session with no cartridge: two joysticks, NTSC timers.
    pub fn new(options: InputOptions) -> Self {
        let mut session = Self {
            vector: InputVector::new(),
            ports: [Peripheral::Joystick, Peripheral::Joystick],
            difficulty: DifficultySwitches::new(60.0),
            options,
        };
        session.write_difficulty();
        session
    }

    /// Reset all input state for a freshly loaded cartridge.
    pub fn load_cartridge(&mut self, cart: &CartridgeInfo, timing: VideoTiming, frame_rate: f64) {
        self.vector = InputVector::new();
        self.ports = [
            Peripheral::for_port(0, cart, timing),
            Peripheral::for_port(1, cart, timing),
        ];
        self.difficulty.reset(frame_rate);
        self.write_difficulty();
        info!(
            "input session for \"{}\": port 0 {}, port 1 {}",
            cart.title,
            describe(&self.ports[0]),
            describe(&self.ports[1])
        );
    }

    pub fn options(&self) -> &InputOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: InputOptions) {
        self.options = options;
    }

    pub fn input(&self) -> &InputVector {
        &self.vector
    }

    pub fn peripheral(&self, port: usize) -> &Peripheral {
        &self.ports[port]
    }

    pub fn difficulty(&self) -> &DifficultySwitches {
        &self.difficulty
    }

    pub fn lightgun(&self) -> Option<&LightgunMapper> {
        self.ports[0].lightgun()
    }

    /// Rebuild the input vector from one raw poll.
    pub fn refresh(&mut self, raw: &RawInput) -> FrameEvents {
        let swap = self.options.swap_buttons;
        let mut pause = false;
        for (port, peripheral) in self.ports.iter_mut().enumerate() {
            pause |= translate(port, raw, peripheral, swap, &mut self.vector);
        }

        if self.options.difficulty_switches {
            let (left_mask, right_mask) = self.ports[0].difficulty_buttons();
            let held = raw.ports[0].held();
            self.difficulty.update(held.any(left_mask), held.any(right_mask));
        }
        self.write_difficulty();

        FrameEvents {
            pause,
            quit: raw.quit,
        }
    }

    /// Advance per-frame timers; called once per executed frame.
    pub fn tick(&mut self) {
        self.difficulty.tick();
    }

    /// Require a fresh trigger release, e.g. after returning from a menu
    /// whose confirm button is the trigger.
    pub fn rearm_trigger(&mut self) {
        if let Some(gun) = self.ports[0].lightgun_mut() {
            gun.rearm();
        }
    }

    /// Aim point to hand to the emulation core, if a light gun is active.
    pub fn lightgun_aim(&self) -> Option<(i32, f32)> {
        self.lightgun().and_then(LightgunMapper::aim)
    }

    /// Overlay for the current frame (without the FPS counter).
    pub fn overlay(&self) -> Overlay {
        let crosshair = if self.options.lightgun_crosshair {
            self.lightgun().and_then(LightgunMapper::crosshair)
        } else {
            None
        };
        let difficulty = self
            .difficulty
            .indicator_visible(self.options.difficulty_display)
            .then(|| (!self.difficulty.left(), !self.difficulty.right()));
        Overlay {
            crosshair,
            difficulty,
            fps: None,
        }
    }

    fn write_difficulty(&mut self) {
        self.vector.set(Slot::LeftDifficulty, self.difficulty.left());
        self.vector.set(Slot::RightDifficulty, self.difficulty.right());
    }
}

fn describe(peripheral: &Peripheral) -> &'static str {
    match peripheral {
        Peripheral::Joystick => "joystick",
        Peripheral::TwinStick => "twin-stick",
        Peripheral::Lightgun(_) => "light gun",
    }
}
