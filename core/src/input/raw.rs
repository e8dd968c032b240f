use std::ops::{BitOr, BitOrAssign};

/// Deflection past which an analog stick counts as a pressed direction.
/// Stick axes are normalised to [-1.0, 1.0].
pub const STICK_THRESHOLD: f32 = 0.5;

/// Logical host buttons of one physical device, after the frontend's key
/// and controller mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Buttons(pub u32);

impl Buttons {
    pub const NONE: Buttons = Buttons(0);

    pub const RIGHT: u32 = 1 << 0;
    pub const LEFT: u32 = 1 << 1;
    pub const DOWN: u32 = 1 << 2;
    pub const UP: u32 = 1 << 3;
    pub const FIRE_1: u32 = 1 << 4;
    pub const FIRE_2: u32 = 1 << 5;
    pub const RESET: u32 = 1 << 6;
    pub const SELECT: u32 = 1 << 7;
    pub const PAUSE: u32 = 1 << 8;
    pub const DIFF_LEFT: u32 = 1 << 9;
    pub const DIFF_RIGHT: u32 = 1 << 10;
    // Alternate difficulty bindings used while the light gun owns the
    // primary device's regular buttons.
    pub const DIFF_LEFT_LG: u32 = 1 << 11;
    pub const DIFF_RIGHT_LG: u32 = 1 << 12;
    pub const TRIGGER: u32 = 1 << 13;
    /// Host menu / pause gesture.
    pub const HOME: u32 = 1 << 14;

    /// True if any bit of `mask` is set.
    pub fn any(self, mask: u32) -> bool {
        self.0 & mask != 0
    }

    pub fn with(self, mask: u32) -> Self {
        Self(self.0 | mask)
    }
}

impl BitOr for Buttons {
    type Output = Buttons;

    fn bitor(self, rhs: Buttons) -> Buttons {
        Buttons(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    fn bitor_assign(&mut self, rhs: Buttons) {
        self.0 |= rhs.0;
    }
}

/// Analog stick position; +x is right, +y is up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stick {
    pub x: f32,
    pub y: f32,
}

impl Stick {
    pub const CENTER: Stick = Stick { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn right(self) -> bool {
        self.x > STICK_THRESHOLD
    }

    pub fn left(self) -> bool {
        self.x < -STICK_THRESHOLD
    }

    pub fn up(self) -> bool {
        self.y > STICK_THRESHOLD
    }

    pub fn down(self) -> bool {
        self.y < -STICK_THRESHOLD
    }
}

/// One physical device plugged into a port. A disconnected device reads
/// as the default (nothing held, sticks centred).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DeviceState {
    /// Buttons currently down.
    pub held: Buttons,
    /// Buttons that went down since the previous poll.
    pub pressed: Buttons,
    pub stick: Stick,
    /// Right stick, used for twin-stick cartridges.
    pub secondary_stick: Stick,
}

/// Everything sampled for one logical port: a primary device and an
/// auxiliary one whose inputs are OR'd in.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawPortState {
    pub primary: DeviceState,
    pub auxiliary: DeviceState,
}

impl RawPortState {
    pub fn held(&self) -> Buttons {
        self.primary.held | self.auxiliary.held
    }

    pub fn pressed(&self) -> Buttons {
        self.primary.pressed | self.auxiliary.pressed
    }

    pub fn sticks(&self) -> [Stick; 2] {
        [self.primary.stick, self.auxiliary.stick]
    }

    pub fn secondary_sticks(&self) -> [Stick; 2] {
        [self.primary.secondary_stick, self.auxiliary.secondary_stick]
    }
}

/// One poll of every host input device.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawInput {
    pub ports: [RawPortState; 2],
    /// Pointer position in display space, `None` when off-screen or
    /// untracked.
    pub pointer: Option<(i32, i32)>,
    /// Dedicated hardware button on the host (e.g. a console's power or
    /// reset key) that opens the menu.
    pub host_button: bool,
    /// Window closed or equivalent.
    pub quit: bool,
}
