use std::collections::HashMap;

use beamline_core::core::HostInput;
use beamline_core::core::timing::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use beamline_core::input::{Buttons, DeviceState, RawInput, Stick};
use sdl2::EventPump;
use sdl2::GameControllerSubsystem;
use sdl2::controller::{Axis, Button, GameController};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Scancode;

/// Maps SDL scancodes to (port, button) pairs.
pub struct KeyMap {
    map: HashMap<Scancode, (usize, u32)>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Bind a scancode to a button on a port.
    pub fn bind(&mut self, scancode: Scancode, port: usize, button: u32) {
        self.map.insert(scancode, (port, button));
    }

    /// Look up the binding for a scancode.
    pub fn get(&self, scancode: Scancode) -> Option<(usize, u32)> {
        self.map.get(&scancode).copied()
    }
}

/// Default keyboard layout: arrows and Ctrl/Alt for port 0, WASD and Q/E
/// for port 1, function keys for the console panel.
pub fn default_key_map() -> KeyMap {
    let mut km = KeyMap::new();

    let bindings = [
        // Port 0
        (Scancode::Right, 0, Buttons::RIGHT),
        (Scancode::Left, 0, Buttons::LEFT),
        (Scancode::Down, 0, Buttons::DOWN),
        (Scancode::Up, 0, Buttons::UP),
        (Scancode::LCtrl, 0, Buttons::FIRE_1),
        (Scancode::Z, 0, Buttons::FIRE_1),
        (Scancode::LAlt, 0, Buttons::FIRE_2),
        (Scancode::X, 0, Buttons::FIRE_2),
        (Scancode::Space, 0, Buttons::TRIGGER),
        // Port 1
        (Scancode::D, 1, Buttons::RIGHT),
        (Scancode::A, 1, Buttons::LEFT),
        (Scancode::S, 1, Buttons::DOWN),
        (Scancode::W, 1, Buttons::UP),
        (Scancode::Q, 1, Buttons::FIRE_1),
        (Scancode::E, 1, Buttons::FIRE_2),
        // Console panel
        (Scancode::F1, 0, Buttons::SELECT),
        (Scancode::F2, 0, Buttons::RESET),
        (Scancode::P, 0, Buttons::PAUSE),
        (Scancode::F5, 0, Buttons::DIFF_LEFT),
        (Scancode::F6, 0, Buttons::DIFF_RIGHT),
        (Scancode::F7, 0, Buttons::DIFF_LEFT_LG),
        (Scancode::F8, 0, Buttons::DIFF_RIGHT_LG),
        // Host
        (Scancode::Tab, 0, Buttons::HOME),
    ];
    for (scancode, port, button) in bindings {
        km.bind(scancode, port, button);
    }

    km
}

const CONTROLLER_BUTTONS: [(Button, u32); 12] = [
    (Button::DPadRight, Buttons::RIGHT),
    (Button::DPadLeft, Buttons::LEFT),
    (Button::DPadDown, Buttons::DOWN),
    (Button::DPadUp, Buttons::UP),
    (Button::A, Buttons::FIRE_1),
    (Button::B, Buttons::FIRE_2),
    (Button::X, Buttons::RESET),
    (Button::Back, Buttons::SELECT),
    (Button::Start, Buttons::PAUSE),
    (Button::LeftShoulder, Buttons::DIFF_LEFT),
    (Button::RightShoulder, Buttons::DIFF_RIGHT),
    (Button::Guide, Buttons::HOME),
];

/// Normalise an SDL axis reading to [-1, 1].
pub fn axis_value(raw: i16) -> f32 {
    (raw as f32 / i16::MAX as f32).clamp(-1.0, 1.0)
}

/// Scale a window-space mouse position into the 640x480 display space.
/// Positions outside the window are invalid.
pub fn pointer_to_display(x: i32, y: i32, window: (u32, u32)) -> Option<(i32, i32)> {
    let (w, h) = window;
    if w == 0 || h == 0 || x < 0 || y < 0 || x as u32 >= w || y as u32 >= h {
        return None;
    }
    let dx = x as i64 * DISPLAY_WIDTH as i64 / w as i64;
    let dy = y as i64 * DISPLAY_HEIGHT as i64 / h as i64;
    Some((dx as i32, dy as i32))
}

/// Buttons that are held now but were not on the previous poll.
pub fn rising(held: Buttons, previous: Buttons) -> Buttons {
    Buttons(held.0 & !previous.0)
}

/// Keyboard, mouse and game controllers sampled once per frame.
///
/// The keyboard (and the mouse, as a light gun) is the primary device of
/// both ports; controller N is the auxiliary device of port N.
pub struct SdlInput {
    event_pump: EventPump,
    controller_subsystem: Option<GameControllerSubsystem>,
    controllers: Vec<GameController>,
    key_map: KeyMap,
    window: (u32, u32),
    previous: [[Buttons; 2]; 2],
}

impl SdlInput {
    pub fn new(
        event_pump: EventPump,
        controller_subsystem: Option<GameControllerSubsystem>,
        key_map: KeyMap,
        window: (u32, u32),
    ) -> Self {
        let mut input = Self {
            event_pump,
            controller_subsystem,
            controllers: Vec::new(),
            key_map,
            window,
            previous: [[Buttons::NONE; 2]; 2],
        };
        let count = input
            .controller_subsystem
            .as_ref()
            .and_then(|gc| gc.num_joysticks().ok())
            .unwrap_or(0);
        for index in 0..count {
            input.open_controller(index);
        }
        input
    }

    fn open_controller(&mut self, index: u32) {
        let Some(subsystem) = &self.controller_subsystem else {
            return;
        };
        if !subsystem.is_game_controller(index) {
            return;
        }
        match subsystem.open(index) {
            Ok(controller) => {
                log::info!("controller {} connected: {}", self.controllers.len(), controller.name());
                self.controllers.push(controller);
            }
            Err(e) => log::warn!("failed to open controller {index}: {e}"),
        }
    }

    fn controller_state(controller: &GameController) -> DeviceState {
        let held = CONTROLLER_BUTTONS
            .iter()
            .filter(|&&(button, _)| controller.button(button))
            .fold(Buttons::NONE, |acc, &(_, mask)| acc | Buttons(mask));
        let held = if controller.axis(Axis::TriggerRight) > i16::MAX / 2 {
            held.with(Buttons::TRIGGER)
        } else {
            held
        };
        DeviceState {
            held,
            pressed: Buttons::NONE,
            // SDL reports +y as down
            stick: Stick::new(
                axis_value(controller.axis(Axis::LeftX)),
                -axis_value(controller.axis(Axis::LeftY)),
            ),
            secondary_stick: Stick::new(
                axis_value(controller.axis(Axis::RightX)),
                -axis_value(controller.axis(Axis::RightY)),
            ),
        }
    }
}

impl HostInput for SdlInput {
    fn poll(&mut self) -> RawInput {
        let mut raw = RawInput::default();

        let events: Vec<Event> = self.event_pump.poll_iter().collect();
        for event in events {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    ..
                } => raw.quit = true,

                Event::Window {
                    win_event: WindowEvent::SizeChanged(w, h),
                    ..
                } => self.window = (w.max(0) as u32, h.max(0) as u32),

                Event::ControllerDeviceAdded { which, .. } => self.open_controller(which),

                Event::ControllerDeviceRemoved { which, .. } => {
                    self.controllers.retain(|c| c.instance_id() != which);
                    log::info!("controller removed ({} left)", self.controllers.len());
                }

                _ => {}
            }
        }

        let keyboard = self.event_pump.keyboard_state();
        for scancode in keyboard.pressed_scancodes() {
            if let Some((port, button)) = self.key_map.get(scancode) {
                raw.ports[port].primary.held |= Buttons(button);
            }
        }

        let mouse = self.event_pump.mouse_state();
        raw.pointer = pointer_to_display(mouse.x(), mouse.y(), self.window);
        if mouse.left() && raw.pointer.is_some() {
            raw.ports[0].primary.held |= Buttons(Buttons::TRIGGER);
        }

        for (port, controller) in self.controllers.iter().take(2).enumerate() {
            raw.ports[port].auxiliary = Self::controller_state(controller);
        }

        for (port, state) in raw.ports.iter_mut().enumerate() {
            for (device, slot) in [&mut state.primary, &mut state.auxiliary].into_iter().enumerate() {
                slot.pressed = rising(slot.held, self.previous[port][device]);
                self.previous[port][device] = slot.held;
            }
        }

        raw
    }
}
