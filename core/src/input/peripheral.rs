use super::lightgun::{LightgunMapper, LightgunSample};
use super::raw::{Buttons, RawInput};
use super::translator::joystick_bits;
use super::vector::PortBits;
use crate::core::cartridge::CartridgeInfo;
use crate::core::timing::VideoTiming;

/// The peripheral plugged into a logical port, chosen once per cartridge
/// load from the cartridge's capability metadata.
#[derive(Clone, Debug)]
pub enum Peripheral {
    /// Standard two-button joystick.
    Joystick,
    /// Joystick whose directions also follow port 0's secondary stick.
    TwinStick,
    /// Light gun; only ever selected for port 0.
    Lightgun(LightgunMapper),
}

impl Peripheral {
    /// Select the peripheral for `port` of a freshly loaded cartridge.
    pub fn for_port(port: usize, cart: &CartridgeInfo, timing: VideoTiming) -> Self {
        match port {
            0 if cart.lightgun() => Peripheral::Lightgun(LightgunMapper::new(cart, timing)),
            1 if cart.dual_analog => Peripheral::TwinStick,
            _ => Peripheral::Joystick,
        }
    }

    /// Produce this port's bits for the frame.
    pub fn port_bits(&mut self, port: usize, raw: &RawInput, swap_buttons: bool) -> PortBits {
        match self {
            Peripheral::Joystick => joystick_bits(&raw.ports[port], &[], swap_buttons),
            Peripheral::TwinStick => {
                joystick_bits(&raw.ports[port], &raw.ports[0].secondary_sticks(), swap_buttons)
            }
            Peripheral::Lightgun(gun) => {
                let trigger_held = raw.ports[port].held().any(Buttons::TRIGGER);
                let LightgunSample { trigger, .. } = gun.update(raw.pointer, trigger_held);
                PortBits {
                    fire_1: trigger,
                    ..PortBits::default()
                }
            }
        }
    }

    /// Host buttons that toggle the (left, right) difficulty switches.
    pub fn difficulty_buttons(&self) -> (u32, u32) {
        match self {
            Peripheral::Lightgun(_) => (Buttons::DIFF_LEFT_LG, Buttons::DIFF_RIGHT_LG),
            _ => (Buttons::DIFF_LEFT, Buttons::DIFF_RIGHT),
        }
    }

    pub fn lightgun(&self) -> Option<&LightgunMapper> {
        match self {
            Peripheral::Lightgun(gun) => Some(gun),
            _ => None,
        }
    }

    pub fn lightgun_mut(&mut self) -> Option<&mut LightgunMapper> {
        match self {
            Peripheral::Lightgun(gun) => Some(gun),
            _ => None,
        }
    }
}
