//! Joystick translation: raw device state to port and console slots.
//!
//! Every directional slot is the OR of the digital bits of both devices on
//! the port and a threshold test on each device's analog stick. Twin-stick
//! cartridges feed port 0's secondary sticks into port 1.

use super::peripheral::Peripheral;
use super::raw::{Buttons, RawInput, RawPortState, Stick};
use super::vector::{ConsoleBits, InputVector, PortBits};

/// Port bits for a joystick on `raw`, with `extra_sticks` merged into the
/// directions.
pub fn joystick_bits(raw: &RawPortState, extra_sticks: &[Stick], swap_buttons: bool) -> PortBits {
    let held = raw.held();
    let sticks = raw.sticks();
    let stick_any = |f: fn(Stick) -> bool| sticks.iter().chain(extra_sticks).any(|&s| f(s));

    let bits = PortBits {
        right: held.any(Buttons::RIGHT) || stick_any(Stick::right),
        left: held.any(Buttons::LEFT) || stick_any(Stick::left),
        down: held.any(Buttons::DOWN) || stick_any(Stick::down),
        up: held.any(Buttons::UP) || stick_any(Stick::up),
        fire_1: held.any(Buttons::FIRE_1),
        fire_2: held.any(Buttons::FIRE_2),
    };

    if swap_buttons { bits.swap_fire() } else { bits }
}

/// Reset/Select/Pause from port 0's devices.
pub fn console_bits(raw: &RawPortState) -> ConsoleBits {
    let held = raw.held();
    ConsoleBits {
        reset: held.any(Buttons::RESET),
        select: held.any(Buttons::SELECT),
        pause: held.any(Buttons::PAUSE),
    }
}

/// Whether the host pause gesture was made this frame.
pub fn home_requested(raw: &RawInput) -> bool {
    raw.ports[0].pressed().any(Buttons::HOME) || raw.host_button
}

/// Translate one port through its selected peripheral and write its slots.
///
/// For port 0 the console buttons are written as well; the return value
/// reports the home gesture, which is only sampled on port 0.
pub fn translate(
    port: usize,
    raw: &RawInput,
    peripheral: &mut Peripheral,
    swap_buttons: bool,
    vector: &mut InputVector,
) -> bool {
    vector.write_port(port, peripheral.port_bits(port, raw, swap_buttons));

    if port == 0 {
        vector.write_console(console_bits(&raw.ports[0]));
        home_requested(raw)
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::raw::DeviceState;
    use crate::input::vector::Slot;

    fn held(mask: u32) -> RawPortState {
        RawPortState {
            primary: DeviceState {
                held: Buttons(mask),
                ..DeviceState::default()
            },
            ..RawPortState::default()
        }
    }

    #[test]
    fn digital_directions() {
        let bits = joystick_bits(&held(Buttons::UP | Buttons::LEFT), &[], false);
        assert!(bits.up && bits.left);
        assert!(!bits.down && !bits.right);
    }

    #[test]
    fn stick_directions() {
        let mut raw = RawPortState::default();
        raw.auxiliary.stick = Stick::new(0.8, -0.8);
        let bits = joystick_bits(&raw, &[], false);
        assert!(bits.right && bits.down);
        assert!(!bits.left && !bits.up);
    }

    #[test]
    fn fire_mapping_and_swap() {
        let raw = held(Buttons::FIRE_1);
        assert!(joystick_bits(&raw, &[], false).fire_1);
        let swapped = joystick_bits(&raw, &[], true);
        assert!(!swapped.fire_1);
        assert!(swapped.fire_2);
    }

    #[test]
    fn console_buttons_only_on_port_zero() {
        let mut raw = RawInput::default();
        raw.ports[1] = held(Buttons::RESET | Buttons::SELECT);
        let mut v = InputVector::new();
        translate(0, &raw, &mut Peripheral::Joystick, false, &mut v);
        translate(1, &raw, &mut Peripheral::Joystick, false, &mut v);
        assert!(!v.get(Slot::Reset));
        assert!(!v.get(Slot::Select));

        raw.ports[0] = held(Buttons::PAUSE);
        translate(0, &raw, &mut Peripheral::Joystick, false, &mut v);
        assert!(v.get(Slot::Pause));
    }

    #[test]
    fn home_gesture_uses_pressed_edge() {
        let mut raw = RawInput::default();
        raw.ports[0].primary.held = Buttons(Buttons::HOME);
        let mut v = InputVector::new();
        assert!(!translate(0, &raw, &mut Peripheral::Joystick, false, &mut v));
        raw.ports[0].primary.pressed = Buttons(Buttons::HOME);
        assert!(translate(0, &raw, &mut Peripheral::Joystick, false, &mut v));
        raw.ports[0].primary.pressed = Buttons::NONE;
        raw.host_button = true;
        assert!(translate(0, &raw, &mut Peripheral::Joystick, false, &mut v));
    }

    #[test]
    fn dual_analog_feeds_port_one_from_port_zero() {
        let mut raw = RawInput::default();
        raw.ports[0].primary.secondary_stick = Stick::new(0.0, 1.0);
        let mut v = InputVector::new();

        translate(1, &raw, &mut Peripheral::Joystick, false, &mut v);
        assert!(!v.get(Slot::P2Up));

        translate(1, &raw, &mut Peripheral::TwinStick, false, &mut v);
        assert!(v.get(Slot::P2Up));

        // Port 0 is never a twin stick, so it ignores its own secondary stick
        translate(0, &raw, &mut Peripheral::Joystick, false, &mut v);
        assert!(!v.get(Slot::P1Up));
    }
}
