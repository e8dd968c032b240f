pub mod difficulty;
pub mod lightgun;
pub mod peripheral;
pub mod raw;
pub mod translator;
pub mod vector;

pub use difficulty::{DifficultySwitches, DisplayPolicy};
pub use lightgun::{LightgunMapper, LightgunSample};
pub use peripheral::Peripheral;
pub use raw::{Buttons, DeviceState, RawInput, RawPortState, Stick};
pub use vector::{ConsoleBits, INPUT_SLOTS, InputVector, PortBits, Slot};
