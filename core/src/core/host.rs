use crate::input::RawInput;

/// Errors raised while persisting battery-backed memory.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("I/O error writing battery RAM: {0}")]
    Io(#[from] std::io::Error),

    #[error("no battery RAM destination configured")]
    NoDestination,
}

/// Per-frame decorations the display backend draws over the console
/// frame. Coordinates are in frame-buffer pixels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overlay {
    /// Centre of the light-gun reticle.
    pub crosshair: Option<(i32, i32)>,
    /// Difficulty switch indicator: `true` means the switch is on (A).
    pub difficulty: Option<(bool, bool)>,
    /// Achieved frame rate, when the debug counter is enabled.
    pub fps: Option<f32>,
}

/// Raw device polling.
pub trait HostInput {
    /// Sample every device once. Called at most once per real frame.
    fn poll(&mut self) -> RawInput;
}

/// Video backend.
pub trait Display {
    /// Whether a real-time sync tick should gate presentation.
    fn sync_available(&self) -> bool;

    /// Present a rendered RGB24 frame with its overlay.
    fn present(&mut self, frame: &[u8], overlay: &Overlay);
}

/// Audio backend.
pub trait AudioSink {
    fn set_muted(&mut self, muted: bool);

    /// Queue samples produced by the last frame.
    fn queue(&mut self, samples: &[i16]);
}

/// Destination for battery-backed cartridge memory.
pub trait BatteryStore {
    fn save(&mut self, data: &[u8]) -> Result<(), PersistError>;
}

/// The set of host collaborators a main loop run talks to.
pub struct Host<'a> {
    pub input: &'a mut dyn HostInput,
    pub display: &'a mut dyn Display,
    pub audio: &'a mut dyn AudioSink,
    pub battery: &'a mut dyn BatteryStore,
}
