/// Number of slots in the logical input vector.
pub const INPUT_SLOTS: usize = 19;

/// Semantic index of a slot in the logical input vector.
///
/// Slots 17 and 18 are reserved and have no variant; they are never
/// written and always read false.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    P1Right = 0,
    P1Left = 1,
    P1Down = 2,
    P1Up = 3,
    P1Fire1 = 4,
    P1Fire2 = 5,
    P2Right = 6,
    P2Left = 7,
    P2Down = 8,
    P2Up = 9,
    P2Fire1 = 10,
    P2Fire2 = 11,
    Reset = 12,
    Select = 13,
    Pause = 14,
    /// Hardware bit: set when the switch is in the B (off) position.
    LeftDifficulty = 15,
    /// Hardware bit: set when the switch is in the B (off) position.
    RightDifficulty = 16,
}

impl Slot {
    pub fn index(self) -> usize {
        self as usize
    }

    /// The six slots of a controller port, in vector order.
    pub fn port(port: usize) -> [Slot; 6] {
        match port {
            0 => [
                Slot::P1Right,
                Slot::P1Left,
                Slot::P1Down,
                Slot::P1Up,
                Slot::P1Fire1,
                Slot::P1Fire2,
            ],
            _ => [
                Slot::P2Right,
                Slot::P2Left,
                Slot::P2Down,
                Slot::P2Up,
                Slot::P2Fire1,
                Slot::P2Fire2,
            ],
        }
    }
}

/// Directional and fire state of one controller port for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PortBits {
    pub right: bool,
    pub left: bool,
    pub down: bool,
    pub up: bool,
    pub fire_1: bool,
    pub fire_2: bool,
}

impl PortBits {
    /// Exchange the two fire buttons.
    pub fn swap_fire(self) -> Self {
        Self {
            fire_1: self.fire_2,
            fire_2: self.fire_1,
            ..self
        }
    }

    fn to_array(self) -> [bool; 6] {
        [
            self.right,
            self.left,
            self.down,
            self.up,
            self.fire_1,
            self.fire_2,
        ]
    }
}

/// Console-wide buttons, sampled from port 0 only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConsoleBits {
    pub reset: bool,
    pub select: bool,
    pub pause: bool,
}

/// Fixed-layout per-frame control state consumed by the emulation core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputVector {
    slots: [bool; INPUT_SLOTS],
}

impl InputVector {
    /// All slots released.
    pub fn new() -> Self {
        Self {
            slots: [false; INPUT_SLOTS],
        }
    }

    pub fn get(&self, slot: Slot) -> bool {
        self.slots[slot.index()]
    }

    pub fn set(&mut self, slot: Slot, value: bool) {
        self.slots[slot.index()] = value;
    }

    /// Write all six slots of a port.
    pub fn write_port(&mut self, port: usize, bits: PortBits) {
        for (slot, value) in Slot::port(port).into_iter().zip(bits.to_array()) {
            self.set(slot, value);
        }
    }

    /// Read back the six slots of a port.
    pub fn port(&self, port: usize) -> PortBits {
        let [right, left, down, up, fire_1, fire_2] = Slot::port(port).map(|s| self.get(s));
        PortBits {
            right,
            left,
            down,
            up,
            fire_1,
            fire_2,
        }
    }

    pub fn write_console(&mut self, bits: ConsoleBits) {
        self.set(Slot::Reset, bits.reset);
        self.set(Slot::Select, bits.select);
        self.set(Slot::Pause, bits.pause);
    }

    pub fn as_slice(&self) -> &[bool; INPUT_SLOTS] {
        &self.slots
    }

    /// Byte form (0/1 per slot) for cores that take a `u8` array.
    pub fn to_bytes(&self) -> [u8; INPUT_SLOTS] {
        self.slots.map(u8::from)
    }
}

impl Default for InputVector {
    fn default() -> Self {
        Self::new()
    }
}
