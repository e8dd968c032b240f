use std::time::Duration;

use beamline_core::core::{Console, Host, HostInput};
use beamline_core::input::translator::home_requested;
use beamline_core::pacer::{ExitReason, MainLoop, SystemClock};

use crate::audio::SdlAudio;
use crate::battery::FileBatteryStore;
use crate::config::Settings;
use crate::error::{FrontendError, sdl};
use crate::input::{self, SdlInput};
use crate::video::Video;

/// Poll interval while paused.
const PAUSE_POLL: Duration = Duration::from_millis(16);

/// Open the SDL window and devices and drive `console` until the user quits.
pub fn run(
    console: &mut dyn Console,
    settings: &Settings,
    fast_forward: Option<u32>,
    battery: &mut FileBatteryStore,
) -> Result<(), FrontendError> {
    let sdl_context = sdl2::init().map_err(sdl)?;
    let sdl_video = sdl_context.video().map_err(sdl)?;
    let sdl_audio = sdl_context
        .audio()
        .inspect_err(|e| log::warn!("no audio subsystem: {e}"))
        .ok();
    let sdl_controllers = sdl_context
        .game_controller()
        .inspect_err(|e| log::warn!("no game controller subsystem: {e}"))
        .ok();

    let (width, height) = console.display_size();
    let title = format!("Beamline - {}", console.cartridge().title);
    let mut video = Video::new(&sdl_video, &title, width, height, settings.scale.max(1))?;
    let event_pump = sdl_context.event_pump().map_err(sdl)?;
    let mut input = SdlInput::new(
        event_pump,
        sdl_controllers,
        input::default_key_map(),
        video.window_size(),
    );
    let mut audio = SdlAudio::open(sdl_audio.as_ref(), console.audio_sample_rate());

    let mut main_loop = MainLoop::new(
        SystemClock::new(),
        settings.input_options(),
        settings.pacer_options(),
    );
    main_loop.load_cartridge(console);
    if let Some(frames) = fast_forward {
        main_loop.fast_forward(frames);
    }

    loop {
        let reason = {
            let mut host = Host {
                input: &mut input,
                display: &mut video,
                audio: &mut audio,
                battery: &mut *battery,
            };
            main_loop.run(console, &mut host)
        };

        match reason {
            ExitReason::Paused => {
                if !wait_while_paused(&mut input) {
                    break;
                }
                main_loop.resume(&mut audio);
            }
            ExitReason::FastForwardComplete => {
                log::info!("fast-forward done, continuing at frame {}", main_loop.frames_executed());
            }
            ExitReason::Quit | ExitReason::CartridgeSwap | ExitReason::Cancelled => break,
        }
    }

    audio.shutdown();
    Ok(())
}

/// Idle with audio muted until the home gesture is repeated (resume, returns
/// true) or the window is closed (returns false).
fn wait_while_paused(input: &mut dyn HostInput) -> bool {
    loop {
        let raw = input.poll();
        if raw.quit {
            return false;
        }
        if home_requested(&raw) {
            return true;
        }
        std::thread::sleep(PAUSE_POLL);
    }
}
