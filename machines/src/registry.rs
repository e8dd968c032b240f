//! Console registry for automatic front-end discovery.
//!
//! Each front-end-capable console self-registers via [`inventory::submit!`]
//! with a [`MachineEntry`] containing its CLI name, a one-line description
//! and a factory function. The front-end discovers available consoles at
//! runtime without any central list.

use beamline_core::core::{Console, Region};

/// Describes a front-end-capable console.
pub struct MachineEntry {
    /// CLI name used to select this console (e.g., "input-test").
    pub name: &'static str,
    /// Shown by `--list`.
    pub description: &'static str,
    /// Factory: construct a console for the requested region.
    pub create: fn(Region) -> Box<dyn Console>,
}

impl MachineEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        create: fn(Region) -> Box<dyn Console>,
    ) -> Self {
        Self {
            name,
            description,
            create,
        }
    }
}

inventory::collect!(MachineEntry);

/// Return all registered consoles, sorted by name.
pub fn all() -> Vec<&'static MachineEntry> {
    let mut entries: Vec<_> = inventory::iter::<MachineEntry>.into_iter().collect();
    entries.sort_by_key(|e| e.name);
    entries
}

/// Look up a console by its CLI name.
pub fn find(name: &str) -> Option<&'static MachineEntry> {
    inventory::iter::<MachineEntry>
        .into_iter()
        .find(|e| e.name == name)
}
