//! The synchronized emulation loop.
//!
//! One step is one logical frame: poll the host devices, refresh the input
//! vector, run the console for a frame, wait for the real-time tick,
//! present, and account the achieved frame rate. A fast-forward budget runs
//! frames silently (no polling, pacing or presentation) and stops once the
//! budget is spent, which is how save states are replayed up to their save
//! point.

use log::{debug, info, warn};

use super::clock::{CancelToken, Clock};
use super::fps::FpsCounter;
use super::timer::{FrameTimer, valid_rate};
use crate::core::console::Console;
use crate::core::host::{AudioSink, BatteryStore, Host};
use crate::input::vector::InputVector;
use crate::session::{InputOptions, Session};

/// Audio samples pulled from the console per frame at most.
const AUDIO_SCRATCH_SAMPLES: usize = 4096;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Paused,
    Stopped,
}

/// Why `MainLoop::run` returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitReason {
    /// The host pause gesture was made; audio is muted.
    Paused,
    /// The host asked to quit.
    Quit,
    /// The fast-forward budget ran out.
    FastForwardComplete,
    /// A different cartridge is about to be loaded.
    CartridgeSwap,
    /// The cancel token fired.
    Cancelled,
}

/// Result of a single step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The frame ran and the loop keeps running.
    Continue,
    /// The frame ran and the loop left `Running`.
    Exit(ExitReason),
    /// The loop is not running; nothing was executed.
    NotRunning,
}

/// Pacing settings.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PacerOptions {
    /// Tick rate override in Hz; `None` uses the console's native rate.
    pub max_frame_rate: Option<f64>,
    /// Report the achieved frame rate in the overlay.
    pub show_fps: bool,
}

pub struct MainLoop<C: Clock> {
    session: Session,
    clock: C,
    timer: FrameTimer,
    fps: FpsCounter,
    options: PacerOptions,
    state: LoopState,
    frames_executed: u64,
    /// Negative: interactive. Zero: stop after this step. Positive: frames
    /// left to run silently.
    fast_forward: i64,
    cancel: CancelToken,
    swap_pending: bool,
    quit_pending: bool,
    pause_pending: bool,
    frame: Vec<u8>,
    audio: Vec<i16>,
}

impl<C: Clock> MainLoop<C> {
    pub fn new(clock: C, input: InputOptions, options: PacerOptions) -> Self {
        Self {
            session: Session::new(input),
            clock,
            timer: FrameTimer::new(tick_rate(options.max_frame_rate, 60.0)),
            fps: FpsCounter::new(),
            options,
            state: LoopState::Idle,
            frames_executed: 0,
            fast_forward: -1,
            cancel: CancelToken::new(),
            swap_pending: false,
            quit_pending: false,
            pause_pending: false,
            frame: Vec::new(),
            audio: vec![0; AUDIO_SCRATCH_SAMPLES],
        }
    }

    /// Prepare for a newly loaded cartridge: reset the input session, the
    /// timer rate and the frame buffer. The loop returns to `Idle`.
    pub fn load_cartridge(&mut self, console: &dyn Console) {
        let cart = console.cartridge();
        let rate = console.frame_rate_hz();
        self.session.load_cartridge(cart, console.video_timing(), rate);
        self.timer = FrameTimer::new(tick_rate(self.options.max_frame_rate, rate));

        let (width, height) = console.display_size();
        self.frame = vec![0; (width * height * 3) as usize];

        self.state = LoopState::Idle;
        self.frames_executed = 0;
        self.fast_forward = -1;
        self.swap_pending = false;
        self.quit_pending = false;
        self.pause_pending = false;
        self.cancel.clear();
        info!("loaded \"{}\" ({:?}, {rate} Hz)", cart.title, cart.region);
    }

    /// Run the next `frames` steps silently, then stop. Zero runs one step.
    pub fn fast_forward(&mut self, frames: u32) {
        self.fast_forward = i64::from(frames);
    }

    pub fn is_fast_forwarding(&self) -> bool {
        self.fast_forward >= 0
    }

    /// Idle/Stopped → Running. Interactive runs unmute audio and restart
    /// the tick and FPS baselines.
    pub fn start(&mut self, audio: &mut dyn AudioSink) {
        if !matches!(self.state, LoopState::Idle | LoopState::Stopped) {
            return;
        }
        self.state = LoopState::Running;
        self.quit_pending = false;
        self.pause_pending = false;
        self.rebase();
        if !self.is_fast_forwarding() {
            audio.set_muted(false);
        }
    }

    /// Running → Paused: mute audio and halt the tick timer.
    pub fn pause(&mut self, audio: &mut dyn AudioSink) {
        if self.state != LoopState::Running {
            return;
        }
        self.state = LoopState::Paused;
        self.pause_pending = false;
        self.timer.halt();
        audio.set_muted(true);
        info!("paused after {} frames", self.frames_executed);
    }

    /// Paused → Running. Timer and FPS baselines restart from now so the
    /// loop does not burst to make up for the time spent paused.
    pub fn resume(&mut self, audio: &mut dyn AudioSink) {
        if self.state != LoopState::Paused {
            return;
        }
        self.state = LoopState::Running;
        self.rebase();
        self.session.rearm_trigger();
        audio.set_muted(false);
        info!("resumed");
    }

    /// Leave the loop before the next frame; battery RAM is not saved by
    /// this exit.
    pub fn request_cartridge_swap(&mut self) {
        self.swap_pending = true;
    }

    /// Handle for stopping the loop from elsewhere.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run frames until the loop leaves `Running`, then persist battery
    /// RAM unless a cartridge swap is pending.
    pub fn run(&mut self, console: &mut dyn Console, host: &mut Host<'_>) -> ExitReason {
        match self.state {
            LoopState::Paused => return ExitReason::Paused,
            LoopState::Idle | LoopState::Stopped => self.start(host.audio),
            LoopState::Running => {}
        }

        let reason = loop {
            match self.step(console, host) {
                StepOutcome::Continue => {}
                StepOutcome::Exit(reason) => break reason,
                StepOutcome::NotRunning => break ExitReason::Cancelled,
            }
        };

        if reason != ExitReason::CartridgeSwap {
            persist_battery_ram(console, host.battery);
        }
        info!("loop exit: {reason:?} after {} frames", self.frames_executed);
        reason
    }

    /// Execute exactly one frame. A frame, once begun, always completes;
    /// stop and pause requests take effect after it.
    pub fn step(&mut self, console: &mut dyn Console, host: &mut Host<'_>) -> StepOutcome {
        if self.state != LoopState::Running {
            return StepOutcome::NotRunning;
        }
        let fast = self.is_fast_forwarding();

        if !fast {
            let raw = host.input.poll();
            let events = self.session.refresh(&raw);
            self.pause_pending |= events.pause;
            self.quit_pending |= events.quit;
        }

        if let Some((scanline, cycle)) = self.session.lightgun_aim() {
            console.aim_lightgun(scanline, cycle);
        }
        console.run_frame(self.session.input());
        self.frames_executed += 1;
        self.session.tick();

        let samples = console.fill_audio(&mut self.audio);

        if !fast {
            if host.display.sync_available() {
                self.timer.wait(&mut self.clock, &self.cancel);
            }
            console.render_frame(&mut self.frame);
            self.fps.record_frame(self.clock.now());

            let mut overlay = self.session.overlay();
            overlay.fps = self.options.show_fps.then(|| self.fps.fps());
            host.display.present(&self.frame, &overlay);
            host.audio.queue(&self.audio[..samples]);
        }

        if self.fast_forward > 0 {
            self.fast_forward -= 1;
        }
        if self.fast_forward == 0 {
            self.fast_forward = -1;
            self.state = LoopState::Stopped;
            debug!("fast-forward complete at frame {}", self.frames_executed);
            return StepOutcome::Exit(ExitReason::FastForwardComplete);
        }

        if self.cancel.is_cancelled() {
            self.state = LoopState::Stopped;
            return StepOutcome::Exit(ExitReason::Cancelled);
        }
        if self.quit_pending {
            self.state = LoopState::Stopped;
            return StepOutcome::Exit(ExitReason::Quit);
        }
        if self.swap_pending {
            self.swap_pending = false;
            self.state = LoopState::Stopped;
            return StepOutcome::Exit(ExitReason::CartridgeSwap);
        }
        if self.pause_pending {
            self.pause(host.audio);
            return StepOutcome::Exit(ExitReason::Paused);
        }
        StepOutcome::Continue
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frames_executed(&self) -> u64 {
        self.frames_executed
    }

    /// Achieved frames per second since the last start/resume.
    pub fn fps(&self) -> f32 {
        self.fps.fps()
    }

    pub fn input(&self) -> &InputVector {
        self.session.input()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    fn rebase(&mut self) {
        let now = self.clock.now();
        self.timer.reset(now);
        self.fps.reset(now);
    }
}

/// Tick rate for the timer: the override when it is usable, else `native`.
fn tick_rate(max_frame_rate: Option<f64>, native: f64) -> f64 {
    match max_frame_rate {
        Some(rate) if valid_rate(rate) => rate,
        Some(rate) => {
            warn!("ignoring frame rate override of {rate} Hz");
            native
        }
        None => native,
    }
}

/// Save battery-backed memory; failures are logged, never fatal.
pub fn persist_battery_ram(console: &dyn Console, store: &mut dyn BatteryStore) {
    let Some(data) = console.save_battery_ram() else {
        return;
    };
    match store.save(data) {
        Ok(()) => debug!("saved {} bytes of battery RAM", data.len()),
        Err(e) => warn!("failed to save battery RAM: {e}"),
    }
}
