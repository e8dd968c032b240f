/// Television standard of a loaded cartridge.
///
/// Selects the frame rate and the number of active scanlines the video chip
/// produces, which in turn feeds the light-gun coordinate mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Region {
    #[default]
    Ntsc,
    Pal,
}

impl Region {
    /// Native frame rate of the console in this region.
    pub fn frame_rate_hz(self) -> f64 {
        match self {
            Region::Ntsc => 60.0,
            Region::Pal => 50.0,
        }
    }
}

/// Controller capability bitmask for one port, as recorded in the
/// cartridge header or database.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControllerFlags(pub u8);

impl ControllerFlags {
    pub const JOYSTICK: u8 = 0x01;
    pub const LIGHTGUN: u8 = 0x02;

    pub fn joystick() -> Self {
        Self(Self::JOYSTICK)
    }

    pub fn lightgun() -> Self {
        Self(Self::LIGHTGUN)
    }

    pub fn has_lightgun(self) -> bool {
        self.0 & Self::LIGHTGUN != 0
    }
}

/// Metadata describing the loaded cartridge that the input layer needs.
#[derive(Clone, Debug, PartialEq)]
pub struct CartridgeInfo {
    /// Title, for logging only.
    pub title: String,
    pub region: Region,
    /// Capabilities for ports 0 and 1.
    pub controllers: [ControllerFlags; 2],
    /// Twin-stick cartridge: port 1's directions also come from port 0's
    /// secondary stick.
    pub dual_analog: bool,
    /// Per-cartridge light-gun calibration in display-space pixels.
    pub crosshair_x: i32,
    pub crosshair_y: i32,
}

impl CartridgeInfo {
    pub fn new(title: impl Into<String>, region: Region) -> Self {
        Self {
            title: title.into(),
            region,
            controllers: [ControllerFlags::joystick(); 2],
            dual_analog: false,
            crosshair_x: 0,
            crosshair_y: 0,
        }
    }

    /// Light-gun support is keyed on port 0's capability flags only.
    pub fn lightgun(&self) -> bool {
        self.controllers[0].has_lightgun()
    }
}

impl Default for CartridgeInfo {
    fn default() -> Self {
        Self::new("", Region::Ntsc)
    }
}
