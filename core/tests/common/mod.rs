#![allow(dead_code)]

use std::collections::VecDeque;

use beamline_core::core::{
    AudioSink, BatteryStore, CartridgeInfo, Console, Display, HostInput, Overlay, PersistError,
};
use beamline_core::input::{InputVector, RawInput};

/// Console that records what the loop hands it.
pub struct FakeConsole {
    pub cart: CartridgeInfo,
    pub inputs: Vec<InputVector>,
    pub aims: Vec<(i32, f32)>,
    pub battery: Option<Vec<u8>>,
    pub samples_per_frame: usize,
    pub resets: u32,
}

impl FakeConsole {
    pub fn new(cart: CartridgeInfo) -> Self {
        Self {
            cart,
            inputs: Vec::new(),
            aims: Vec::new(),
            battery: None,
            samples_per_frame: 0,
            resets: 0,
        }
    }

    pub fn frames(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for FakeConsole {
    fn cartridge(&self) -> &CartridgeInfo {
        &self.cart
    }

    fn display_size(&self) -> (u32, u32) {
        (4, 2)
    }

    fn run_frame(&mut self, input: &InputVector) {
        self.inputs.push(*input);
    }

    fn aim_lightgun(&mut self, scanline: i32, cycle: f32) {
        self.aims.push((scanline, cycle));
    }

    fn render_frame(&self, buffer: &mut [u8]) {
        buffer.fill(self.inputs.len() as u8);
    }

    fn fill_audio(&mut self, buffer: &mut [i16]) -> usize {
        let n = self.samples_per_frame.min(buffer.len());
        buffer[..n].fill(1);
        n
    }

    fn reset(&mut self) {
        self.resets += 1;
    }

    fn save_battery_ram(&self) -> Option<&[u8]> {
        self.battery.as_deref()
    }
}

/// Replays queued polls, then repeats the last one.
#[derive(Default)]
pub struct ScriptedInput {
    pub queue: VecDeque<RawInput>,
    pub last: RawInput,
    pub polls: usize,
}

impl ScriptedInput {
    pub fn push(&mut self, raw: RawInput) {
        self.queue.push_back(raw);
    }
}

impl HostInput for ScriptedInput {
    fn poll(&mut self) -> RawInput {
        self.polls += 1;
        if let Some(raw) = self.queue.pop_front() {
            self.last = raw;
        }
        self.last
    }
}

pub struct RecordingDisplay {
    pub sync: bool,
    pub presents: usize,
    pub overlays: Vec<Overlay>,
}

impl RecordingDisplay {
    pub fn new(sync: bool) -> Self {
        Self {
            sync,
            presents: 0,
            overlays: Vec::new(),
        }
    }
}

impl Display for RecordingDisplay {
    fn sync_available(&self) -> bool {
        self.sync
    }

    fn present(&mut self, _frame: &[u8], overlay: &Overlay) {
        self.presents += 1;
        self.overlays.push(overlay.clone());
    }
}

#[derive(Default)]
pub struct RecordingAudio {
    pub muted: Option<bool>,
    pub mute_calls: Vec<bool>,
    pub queued: usize,
}

impl AudioSink for RecordingAudio {
    fn set_muted(&mut self, muted: bool) {
        self.muted = Some(muted);
        self.mute_calls.push(muted);
    }

    fn queue(&mut self, samples: &[i16]) {
        self.queued += samples.len();
    }
}

#[derive(Default)]
pub struct MemoryBattery {
    pub saves: Vec<Vec<u8>>,
    pub fail: bool,
}

impl BatteryStore for MemoryBattery {
    fn save(&mut self, data: &[u8]) -> Result<(), PersistError> {
        if self.fail {
            return Err(PersistError::NoDestination);
        }
        self.saves.push(data.to_vec());
        Ok(())
    }
}

/// All fakes for one loop run.
pub struct Rig {
    pub input: ScriptedInput,
    pub display: RecordingDisplay,
    pub audio: RecordingAudio,
    pub battery: MemoryBattery,
}

impl Rig {
    pub fn new() -> Self {
        Self {
            input: ScriptedInput::default(),
            display: RecordingDisplay::new(true),
            audio: RecordingAudio::default(),
            battery: MemoryBattery::default(),
        }
    }

    pub fn host(&mut self) -> beamline_core::core::Host<'_> {
        beamline_core::core::Host {
            input: &mut self.input,
            display: &mut self.display,
            audio: &mut self.audio,
            battery: &mut self.battery,
        }
    }
}
