mod common;

use std::time::Duration;

use beamline_core::core::{CartridgeInfo, ControllerFlags, Region};
use beamline_core::input::{Buttons, RawInput, Slot};
use beamline_core::pacer::{Clock, ExitReason, LoopState, MainLoop, ManualClock, PacerOptions, StepOutcome};
use beamline_core::session::InputOptions;
use common::{FakeConsole, Rig};

fn new_loop(console: &FakeConsole) -> MainLoop<ManualClock> {
    let mut main_loop = MainLoop::new(ManualClock::new(), InputOptions::default(), PacerOptions::default());
    main_loop.load_cartridge(console);
    main_loop
}

fn held(mask: u32) -> RawInput {
    let mut raw = RawInput::default();
    raw.ports[0].primary.held = Buttons(mask);
    raw
}

fn quit() -> RawInput {
    RawInput {
        quit: true,
        ..RawInput::default()
    }
}

fn home() -> RawInput {
    let mut raw = RawInput::default();
    raw.ports[0].primary.held = Buttons(Buttons::HOME);
    raw.ports[0].primary.pressed = Buttons(Buttons::HOME);
    raw
}

// =================================================================
// Interactive frames
// =================================================================

#[test]
fn test_new_loop_is_idle() {
    let console = FakeConsole::new(CartridgeInfo::default());
    let main_loop = new_loop(&console);
    assert_eq!(main_loop.state(), LoopState::Idle);
    assert_eq!(main_loop.frames_executed(), 0);
    assert!(!main_loop.is_fast_forwarding());
}

#[test]
fn test_step_requires_running() {
    let mut console = FakeConsole::new(CartridgeInfo::default());
    let mut main_loop = new_loop(&console);
    let mut rig = Rig::new();
    assert_eq!(main_loop.step(&mut console, &mut rig.host()), StepOutcome::NotRunning);
    assert_eq!(console.frames(), 0);
}

#[test]
fn test_interactive_frames_poll_pace_and_present() {
    let mut console = FakeConsole::new(CartridgeInfo::default());
    console.samples_per_frame = 10;
    let mut main_loop = new_loop(&console);
    let mut rig = Rig::new();
    rig.input.push(held(Buttons::RIGHT));
    rig.input.push(held(Buttons::RIGHT));
    rig.input.push(quit());

    let reason = main_loop.run(&mut console, &mut rig.host());

    assert_eq!(reason, ExitReason::Quit);
    assert_eq!(main_loop.state(), LoopState::Stopped);
    assert_eq!(console.frames(), 3);
    assert_eq!(rig.input.polls, 3);
    assert_eq!(rig.display.presents, 3);
    assert_eq!(rig.audio.queued, 30);
    assert_eq!(rig.audio.muted, Some(false));
    assert_eq!(main_loop.clock().waits(), 3);
    assert!(console.inputs[0].get(Slot::P1Right));
    assert!(!console.inputs[2].get(Slot::P1Right));
}

#[test]
fn test_fps_tracks_tick_rate() {
    let mut console = FakeConsole::new(CartridgeInfo::default());
    let mut main_loop = new_loop(&console);
    let mut rig = Rig::new();
    for _ in 0..59 {
        rig.input.push(RawInput::default());
    }
    rig.input.push(quit());

    main_loop.run(&mut console, &mut rig.host());

    assert_eq!(console.frames(), 60);
    assert!((main_loop.fps() - 60.0).abs() < 0.01);
    assert!(main_loop.clock().now() >= Duration::from_millis(999));
}

#[test]
fn test_pal_cartridge_ticks_at_50hz() {
    let mut console = FakeConsole::new(CartridgeInfo::new("pal", Region::Pal));
    let mut main_loop = new_loop(&console);
    let mut rig = Rig::new();
    rig.input.push(RawInput::default());
    rig.input.push(quit());

    main_loop.run(&mut console, &mut rig.host());

    assert_eq!(main_loop.timer().period(), Duration::from_millis(20));
    assert_eq!(main_loop.clock().now(), Duration::from_millis(40));
}

#[test]
fn test_max_frame_rate_overrides_native_rate() {
    let console = FakeConsole::new(CartridgeInfo::default());
    let options = PacerOptions {
        max_frame_rate: Some(100.0),
        ..PacerOptions::default()
    };
    let mut main_loop = MainLoop::new(ManualClock::new(), InputOptions::default(), options);
    main_loop.load_cartridge(&console);
    assert_eq!(main_loop.timer().period(), Duration::from_millis(10));
}

#[test]
fn test_unusable_frame_rate_override_falls_back_to_native() {
    let console = FakeConsole::new(CartridgeInfo::default());
    let native = Duration::from_secs_f64(1.0 / Region::Ntsc.frame_rate_hz());
    for rate in [1e-300, 0.5, -30.0, f64::NAN, f64::INFINITY] {
        let options = PacerOptions {
            max_frame_rate: Some(rate),
            ..PacerOptions::default()
        };
        let mut main_loop = MainLoop::new(ManualClock::new(), InputOptions::default(), options);
        main_loop.load_cartridge(&console);
        assert_eq!(main_loop.timer().period(), native, "rate {rate}");
    }
}

#[test]
fn test_no_sync_source_skips_wait() {
    let mut console = FakeConsole::new(CartridgeInfo::default());
    let mut main_loop = new_loop(&console);
    let mut rig = Rig::new();
    rig.display.sync = false;
    rig.input.push(RawInput::default());
    rig.input.push(quit());

    main_loop.run(&mut console, &mut rig.host());

    assert_eq!(rig.display.presents, 2);
    assert_eq!(main_loop.clock().waits(), 0);
}

#[test]
fn test_show_fps_fills_overlay() {
    let mut console = FakeConsole::new(CartridgeInfo::default());
    let options = PacerOptions {
        show_fps: true,
        ..PacerOptions::default()
    };
    let mut main_loop = MainLoop::new(ManualClock::new(), InputOptions::default(), options);
    main_loop.load_cartridge(&console);
    let mut rig = Rig::new();
    rig.input.push(quit());

    main_loop.run(&mut console, &mut rig.host());

    let fps = rig.display.overlays[0].fps.expect("fps overlay");
    assert!(fps > 59.0);
}

// =================================================================
// Fast-forward
// =================================================================

#[test]
fn test_fast_forward_runs_exactly_n_silent_frames() {
    let mut console = FakeConsole::new(CartridgeInfo::default());
    console.samples_per_frame = 8;
    let mut main_loop = new_loop(&console);
    let mut rig = Rig::new();

    // Establish an input vector interactively first
    let mut last = held(Buttons::LEFT | Buttons::FIRE_1);
    last.quit = true;
    rig.input.push(held(Buttons::LEFT));
    rig.input.push(last);
    assert_eq!(main_loop.run(&mut console, &mut rig.host()), ExitReason::Quit);

    let before = *main_loop.input();
    let presents = rig.display.presents;
    let polls = rig.input.polls;
    let queued = rig.audio.queued;
    let waits = main_loop.clock().waits();

    main_loop.fast_forward(5);
    let reason = main_loop.run(&mut console, &mut rig.host());

    assert_eq!(reason, ExitReason::FastForwardComplete);
    assert_eq!(main_loop.state(), LoopState::Stopped);
    assert_eq!(console.frames(), 2 + 5);
    assert_eq!(rig.display.presents, presents);
    assert_eq!(rig.input.polls, polls);
    assert_eq!(rig.audio.queued, queued);
    assert_eq!(main_loop.clock().waits(), waits);
    assert_eq!(*main_loop.input(), before);
    assert!(console.inputs[2..].iter().all(|v| *v == before));
    assert!(!main_loop.is_fast_forwarding());
}

#[test]
fn test_fast_forward_from_idle() {
    let mut console = FakeConsole::new(CartridgeInfo::default());
    let mut main_loop = new_loop(&console);
    let mut rig = Rig::new();

    main_loop.fast_forward(120);
    let reason = main_loop.run(&mut console, &mut rig.host());

    assert_eq!(reason, ExitReason::FastForwardComplete);
    assert_eq!(console.frames(), 120);
    assert_eq!(rig.display.presents, 0);
    assert_eq!(rig.audio.muted, None);
}

#[test]
fn test_fast_forward_zero_runs_one_step() {
    let mut console = FakeConsole::new(CartridgeInfo::default());
    let mut main_loop = new_loop(&console);
    let mut rig = Rig::new();

    main_loop.fast_forward(0);
    main_loop.run(&mut console, &mut rig.host());

    assert_eq!(console.frames(), 1);
}

#[test]
fn test_interactive_after_fast_forward() {
    let mut console = FakeConsole::new(CartridgeInfo::default());
    let mut main_loop = new_loop(&console);
    let mut rig = Rig::new();

    main_loop.fast_forward(3);
    main_loop.run(&mut console, &mut rig.host());
    rig.input.push(RawInput::default());
    rig.input.push(quit());
    let reason = main_loop.run(&mut console, &mut rig.host());

    assert_eq!(reason, ExitReason::Quit);
    assert_eq!(console.frames(), 5);
    assert_eq!(rig.display.presents, 2);
    assert_eq!(rig.audio.muted, Some(false));
}

// =================================================================
// Pause / resume
// =================================================================

#[test]
fn test_home_gesture_pauses_and_mutes() {
    let mut console = FakeConsole::new(CartridgeInfo::default());
    let mut main_loop = new_loop(&console);
    let mut rig = Rig::new();
    rig.input.push(RawInput::default());
    rig.input.push(home());

    let reason = main_loop.run(&mut console, &mut rig.host());

    assert_eq!(reason, ExitReason::Paused);
    assert_eq!(main_loop.state(), LoopState::Paused);
    // The frame during which pause was requested still completes
    assert_eq!(console.frames(), 2);
    assert_eq!(rig.audio.muted, Some(true));
    assert!(main_loop.timer().is_halted());

    // Running a paused loop does nothing
    assert_eq!(main_loop.run(&mut console, &mut rig.host()), ExitReason::Paused);
    assert_eq!(console.frames(), 2);
}

#[test]
fn test_resume_does_not_burst_after_long_pause() {
    let mut console = FakeConsole::new(CartridgeInfo::default());
    let mut main_loop = new_loop(&console);
    let mut rig = Rig::new();
    rig.input.push(RawInput::default());
    rig.input.push(home());
    main_loop.run(&mut console, &mut rig.host());

    main_loop.clock_mut().advance(Duration::from_secs(30));
    main_loop.resume(&mut rig.audio);
    assert_eq!(main_loop.state(), LoopState::Running);
    assert_eq!(rig.audio.muted, Some(false));

    let resumed_at = main_loop.clock().now();
    let period = main_loop.timer().period();
    for _ in 0..5 {
        rig.input.push(RawInput::default());
    }
    rig.input.push(quit());

    for frame in 1..=6u32 {
        main_loop.step(&mut console, &mut rig.host());
        // Exactly one tick per frame: no frames without a wait
        assert_eq!(main_loop.clock().now(), resumed_at + period * frame);
    }
    assert!(main_loop.fps() < 60.1);
    assert!(main_loop.fps() > 59.9);
}

#[test]
fn test_host_button_pauses() {
    let mut console = FakeConsole::new(CartridgeInfo::default());
    let mut main_loop = new_loop(&console);
    let mut rig = Rig::new();
    rig.input.push(RawInput {
        host_button: true,
        ..RawInput::default()
    });

    assert_eq!(main_loop.run(&mut console, &mut rig.host()), ExitReason::Paused);
}

#[test]
fn test_pause_and_resume_ignore_wrong_states() {
    let console = FakeConsole::new(CartridgeInfo::default());
    let mut main_loop = new_loop(&console);
    let mut rig = Rig::new();
    main_loop.pause(&mut rig.audio);
    assert_eq!(main_loop.state(), LoopState::Idle);
    main_loop.resume(&mut rig.audio);
    assert_eq!(main_loop.state(), LoopState::Idle);
    assert!(rig.audio.mute_calls.is_empty());
}

// =================================================================
// Exit handling and persistence
// =================================================================

#[test]
fn test_battery_ram_saved_on_exit() {
    let mut console = FakeConsole::new(CartridgeInfo::default());
    console.battery = Some(vec![1, 2, 3]);
    let mut main_loop = new_loop(&console);
    let mut rig = Rig::new();
    rig.input.push(home());

    main_loop.run(&mut console, &mut rig.host());

    assert_eq!(rig.battery.saves, vec![vec![1, 2, 3]]);
}

#[test]
fn test_battery_ram_saved_after_fast_forward() {
    let mut console = FakeConsole::new(CartridgeInfo::default());
    console.battery = Some(vec![9]);
    let mut main_loop = new_loop(&console);
    let mut rig = Rig::new();

    main_loop.fast_forward(2);
    main_loop.run(&mut console, &mut rig.host());

    assert_eq!(rig.battery.saves.len(), 1);
}

#[test]
fn test_cartridge_swap_skips_battery_save() {
    let mut console = FakeConsole::new(CartridgeInfo::default());
    console.battery = Some(vec![7; 16]);
    let mut main_loop = new_loop(&console);
    let mut rig = Rig::new();

    main_loop.request_cartridge_swap();
    let reason = main_loop.run(&mut console, &mut rig.host());

    assert_eq!(reason, ExitReason::CartridgeSwap);
    assert_eq!(console.frames(), 1);
    assert!(rig.battery.saves.is_empty());
}

#[test]
fn test_battery_failure_is_not_fatal() {
    let mut console = FakeConsole::new(CartridgeInfo::default());
    console.battery = Some(vec![0; 4]);
    let mut main_loop = new_loop(&console);
    let mut rig = Rig::new();
    rig.battery.fail = true;
    rig.input.push(quit());

    assert_eq!(main_loop.run(&mut console, &mut rig.host()), ExitReason::Quit);

    // The loop can be started again afterwards
    rig.input.push(quit());
    assert_eq!(main_loop.run(&mut console, &mut rig.host()), ExitReason::Quit);
    assert_eq!(console.frames(), 2);
}

#[test]
fn test_cancel_token_stops_after_frame() {
    let mut console = FakeConsole::new(CartridgeInfo::default());
    let mut main_loop = new_loop(&console);
    let mut rig = Rig::new();
    let token = main_loop.cancel_token();

    main_loop.start(&mut rig.audio);
    assert_eq!(main_loop.step(&mut console, &mut rig.host()), StepOutcome::Continue);
    token.cancel();
    assert_eq!(
        main_loop.step(&mut console, &mut rig.host()),
        StepOutcome::Exit(ExitReason::Cancelled)
    );
    // The cancelled frame still ran and was presented
    assert_eq!(console.frames(), 2);
    assert_eq!(rig.display.presents, 2);
}

#[test]
fn test_reload_returns_to_idle() {
    let mut console = FakeConsole::new(CartridgeInfo::default());
    let mut main_loop = new_loop(&console);
    let mut rig = Rig::new();
    rig.input.push(quit());
    main_loop.run(&mut console, &mut rig.host());

    main_loop.load_cartridge(&console);
    assert_eq!(main_loop.state(), LoopState::Idle);
    assert_eq!(main_loop.frames_executed(), 0);
}

// =================================================================
// Light gun plumbing
// =================================================================

#[test]
fn test_lightgun_aim_reaches_console() {
    let mut cart = CartridgeInfo::new("gun", Region::Ntsc);
    cart.controllers[0] = ControllerFlags::lightgun();
    let mut console = FakeConsole::new(cart);
    let mut main_loop = new_loop(&console);
    let mut rig = Rig::new();
    rig.input.push(RawInput {
        pointer: Some((0, 0)),
        ..RawInput::default()
    });
    rig.input.push(RawInput {
        pointer: Some((0, 0)),
        quit: true,
        ..RawInput::default()
    });

    main_loop.run(&mut console, &mut rig.host());

    assert_eq!(console.aims.len(), 2);
    assert_eq!(console.aims[1], (13, 188.0));
    assert!(rig.display.overlays[0].crosshair.is_some());
}

#[test]
fn test_lightgun_aim_unset_until_pointer_on_screen() {
    let mut cart = CartridgeInfo::new("gun", Region::Ntsc);
    cart.controllers[0] = ControllerFlags::lightgun();
    let mut console = FakeConsole::new(cart);
    let mut main_loop = new_loop(&console);
    let mut rig = Rig::new();
    rig.input.push(RawInput::default());
    rig.input.push(RawInput {
        pointer: Some((900, 100)),
        ..RawInput::default()
    });
    rig.input.push(RawInput {
        pointer: Some((0, 0)),
        quit: true,
        ..RawInput::default()
    });

    main_loop.run(&mut console, &mut rig.host());

    assert_eq!(main_loop.frames_executed(), 3);
    assert_eq!(console.aims, vec![(13, 188.0)]);
}

#[test]
fn test_joystick_cartridge_never_aims() {
    let mut console = FakeConsole::new(CartridgeInfo::default());
    let mut main_loop = new_loop(&console);
    let mut rig = Rig::new();
    rig.input.push(RawInput {
        pointer: Some((50, 50)),
        quit: true,
        ..RawInput::default()
    });

    main_loop.run(&mut console, &mut rig.host());

    assert!(console.aims.is_empty());
    assert!(rig.display.overlays[0].crosshair.is_none());
}
