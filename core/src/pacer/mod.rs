pub mod clock;
pub mod fps;
pub mod main_loop;
pub mod timer;

pub use clock::{CancelToken, Clock, ManualClock, SystemClock, WaitOutcome};
pub use fps::FpsCounter;
pub use main_loop::{ExitReason, LoopState, MainLoop, PacerOptions, StepOutcome};
pub use timer::FrameTimer;
