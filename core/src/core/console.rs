use super::cartridge::CartridgeInfo;
use super::timing::VideoTiming;
use crate::input::InputVector;

/// Interface to the emulation core driven by the main loop.
///
/// The core owns CPU, video chip and cartridge state. The host layer only
/// hands it one input vector per frame, the light-gun aim point, and reads
/// back the rendered frame, audio samples and battery-backed memory.
pub trait Console {
    /// Metadata of the currently loaded cartridge.
    fn cartridge(&self) -> &CartridgeInfo;

    /// Video chip timing used for light-gun coordinate mapping.
    fn video_timing(&self) -> VideoTiming {
        VideoTiming::for_region(self.cartridge().region)
    }

    /// Rendered frame size as (width, height) in pixels.
    fn display_size(&self) -> (u32, u32);

    /// Native frame rate; defaults to the cartridge region's rate.
    fn frame_rate_hz(&self) -> f64 {
        self.cartridge().region.frame_rate_hz()
    }

    /// Execute exactly one frame with the given controls.
    fn run_frame(&mut self, input: &InputVector);

    /// Light-gun aim point in video chip coordinates, consulted while the
    /// next frame is generated.
    fn aim_lightgun(&mut self, _scanline: i32, _cycle: f32) {}

    /// Render the current video state into an RGB24 buffer of at least
    /// `width * height * 3` bytes.
    fn render_frame(&self, buffer: &mut [u8]);

    /// Drain pending audio samples into `buffer`; returns how many were
    /// written.
    fn fill_audio(&mut self, _buffer: &mut [i16]) -> usize {
        0
    }

    /// Output sample rate, or 0 when the console produces no audio.
    fn audio_sample_rate(&self) -> u32 {
        0
    }

    /// Reset to the power-on state of the loaded cartridge.
    fn reset(&mut self);

    /// Battery-backed memory (high-score cartridge) to persist, if any.
    fn save_battery_ram(&self) -> Option<&[u8]> {
        None
    }

    /// Restore battery-backed memory previously returned by
    /// `save_battery_ram()`.
    fn load_battery_ram(&mut self, _data: &[u8]) {}
}
