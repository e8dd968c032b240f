pub mod core;
pub mod input;
pub mod pacer;
pub mod session;

pub mod prelude {
    pub use crate::core::{
        AudioSink, BatteryStore, CartridgeInfo, Console, ControllerFlags, Display, Host, HostInput,
        Overlay, PersistError, Region, VideoTiming,
    };
    pub use crate::input::{Buttons, InputVector, RawInput, Slot, Stick};
    pub use crate::pacer::{Clock, ExitReason, LoopState, MainLoop, PacerOptions, SystemClock};
    pub use crate::session::{InputOptions, Session};
}
