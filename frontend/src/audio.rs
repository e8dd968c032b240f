use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use beamline_core::core::AudioSink;
use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

/// Number of samples over which to fade in/out (~5.8 ms at 44.1 kHz).
const FADE_SAMPLES: u32 = 256;

/// Queued samples beyond this are dropped oldest-first so latency stays
/// bounded when the callback falls behind.
const MAX_QUEUED: usize = 8192;

pub(crate) struct AudioPlayer {
    buffer: AudioRing,
    fade_in_pos: u32,
    fading_out: Arc<AtomicBool>,
    fade_out_pos: u32,
}

impl AudioCallback for AudioPlayer {
    type Channel = i16;
    fn callback(&mut self, out: &mut [i16]) {
        let Ok(mut buf) = self.buffer.lock() else {
            out.fill(0);
            return;
        };
        for sample in out.iter_mut() {
            let raw = buf.pop_front().unwrap_or(0);

            if self.fade_in_pos < FADE_SAMPLES {
                // Ramp up from silence after (re)start
                let gain = self.fade_in_pos as f32 / FADE_SAMPLES as f32;
                *sample = (raw as f32 * gain) as i16;
                self.fade_in_pos += 1;
            } else if self.fading_out.load(Ordering::Relaxed) {
                // Ramp down to silence before muting
                if self.fade_out_pos < FADE_SAMPLES {
                    let gain = 1.0 - (self.fade_out_pos as f32 / FADE_SAMPLES as f32);
                    *sample = (raw as f32 * gain) as i16;
                    self.fade_out_pos += 1;
                } else {
                    *sample = 0;
                }
            } else {
                *sample = raw;
            }
        }
    }
}

/// Shared audio ring buffer. The emulator thread pushes samples in;
/// the SDL audio callback thread pops them out.
pub type AudioRing = Arc<Mutex<VecDeque<i16>>>;

/// SDL playback behind the loop's audio sink interface. Consoles without
/// audio, or hosts without an audio device, get a sink that discards.
pub struct SdlAudio {
    device: Option<AudioDevice<AudioPlayer>>,
    ring: AudioRing,
    fade_out: Arc<AtomicBool>,
    muted: bool,
}

impl SdlAudio {
    /// Open playback at `sample_rate`. The device starts paused and muted.
    pub fn open(sdl_audio: Option<&sdl2::AudioSubsystem>, sample_rate: u32) -> Self {
        let ring: AudioRing = Arc::new(Mutex::new(VecDeque::with_capacity(4096)));
        let fade_out = Arc::new(AtomicBool::new(false));

        let device = match sdl_audio {
            Some(subsystem) if sample_rate > 0 => {
                let desired_spec = AudioSpecDesired {
                    freq: Some(sample_rate as i32),
                    channels: Some(1),
                    samples: Some(512), // ~11.6 ms at 44100 Hz
                };
                subsystem
                    .open_playback(None, &desired_spec, |_spec| AudioPlayer {
                        buffer: Arc::clone(&ring),
                        fade_in_pos: 0,
                        fading_out: Arc::clone(&fade_out),
                        fade_out_pos: 0,
                    })
                    .inspect_err(|e| log::warn!("audio disabled: {e}"))
                    .ok()
            }
            _ => None,
        };

        Self {
            device,
            ring,
            fade_out,
            muted: true,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Let the callback ramp down, then stop the device.
    pub fn shutdown(&mut self) {
        if let Some(device) = &self.device {
            self.fade_out.store(true, Ordering::Relaxed);
            std::thread::sleep(fade_out_duration());
            device.pause();
        }
    }
}

impl AudioSink for SdlAudio {
    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        let Some(device) = &mut self.device else {
            return;
        };
        if muted {
            device.pause();
            if let Ok(mut ring) = self.ring.lock() {
                ring.clear();
            }
        } else {
            // Restart with a fresh fade-in so resuming does not click
            let mut player = device.lock();
            player.fade_in_pos = 0;
            player.fade_out_pos = 0;
            drop(player);
            self.fade_out.store(false, Ordering::Relaxed);
            device.resume();
        }
    }

    fn queue(&mut self, samples: &[i16]) {
        if self.muted || self.device.is_none() {
            return;
        }
        if let Ok(mut ring) = self.ring.lock() {
            ring.extend(samples.iter().copied());
            let excess = ring.len().saturating_sub(MAX_QUEUED);
            ring.drain(..excess);
        }
    }
}

/// Duration to sleep after signalling fade-out, allowing the callback
/// to ramp down before the device is paused.
pub fn fade_out_duration() -> std::time::Duration {
    // FADE_SAMPLES at 44100 Hz is about 5.8 ms; round up to 10 ms.
    std::time::Duration::from_millis(10)
}
