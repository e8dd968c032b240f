pub mod cartridge;
pub mod console;
pub mod host;
pub mod timing;

pub use cartridge::{CartridgeInfo, ControllerFlags, Region};
pub use console::Console;
pub use host::{AudioSink, BatteryStore, Display, Host, HostInput, Overlay, PersistError};
pub use timing::{FrameGeometry, VideoTiming};
