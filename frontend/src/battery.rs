//! Battery-backed RAM on disk: loaded once at startup and written back by
//! the main loop when it exits.

use std::path::{Path, PathBuf};

use beamline_core::core::{BatteryStore, PersistError};

pub struct FileBatteryStore {
    path: Option<PathBuf>,
}

impl FileBatteryStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// `<data dir>/beamline/<machine>.nvram`.
    pub fn default_path(machine_name: &str) -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("beamline").join(format!("{machine_name}.nvram")))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Previously saved contents, if any.
    pub fn load(&self) -> Option<Vec<u8>> {
        let path = self.path.as_ref()?;
        match std::fs::read(path) {
            Ok(data) => {
                log::info!("loaded {} bytes of battery RAM from {}", data.len(), path.display());
                Some(data)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("failed to read battery RAM from {}: {e}", path.display());
                None
            }
        }
    }
}

impl BatteryStore for FileBatteryStore {
    fn save(&mut self, data: &[u8]) -> Result<(), PersistError> {
        let path = self.path.as_ref().ok_or(PersistError::NoDestination)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, data)?;
        Ok(())
    }
}
