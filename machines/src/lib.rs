pub mod registry;

pub use input_test::InputTestConsole;
pub use registry::MachineEntry;
