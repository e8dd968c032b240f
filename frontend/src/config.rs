//! Persistent front-end settings, stored as TOML under the user's config
//! directory. A missing file means defaults; command-line flags override
//! whatever the file says.

use std::path::{Path, PathBuf};

use beamline_core::input::DisplayPolicy;
use beamline_core::pacer::PacerOptions;
use beamline_core::pacer::timer::{MIN_RATE_HZ, valid_rate};
use beamline_core::session::InputOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid settings in {}: {message}", .path.display())]
    Invalid { path: PathBuf, message: String },
}

/// When the difficulty switch indicator is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DifficultyDisplay {
    Never,
    #[default]
    WhenChanged,
    Always,
}

impl From<DifficultyDisplay> for DisplayPolicy {
    fn from(display: DifficultyDisplay) -> Self {
        match display {
            DifficultyDisplay::Never => DisplayPolicy::Never,
            DifficultyDisplay::WhenChanged => DisplayPolicy::WhenChanged,
            DifficultyDisplay::Always => DisplayPolicy::Always,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Integer window scale of the emulated frame.
    pub scale: u32,
    pub swap_buttons: bool,
    pub difficulty_switches: bool,
    pub difficulty_display: DifficultyDisplay,
    pub lightgun_crosshair: bool,
    pub show_fps: bool,
    /// Tick rate override in Hz; 0 runs at the console's native rate.
    pub max_frame_rate: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scale: 3,
            swap_buttons: false,
            difficulty_switches: true,
            difficulty_display: DifficultyDisplay::WhenChanged,
            lightgun_crosshair: true,
            show_fps: false,
            max_frame_rate: 0.0,
        }
    }
}

impl Settings {
    /// `<config dir>/beamline/settings.toml`, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("beamline").join("settings.toml"))
    }

    /// Load settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let settings: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate().map_err(|message| ConfigError::Invalid {
            path: path.to_path_buf(),
            message,
        })?;
        Ok(settings)
    }

    /// Reject values the front end cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_frame_rate != 0.0 && !valid_rate(self.max_frame_rate) {
            return Err(format!(
                "max_frame_rate must be 0 or at least {MIN_RATE_HZ} Hz, got {}",
                self.max_frame_rate
            ));
        }
        Ok(())
    }

    pub fn input_options(&self) -> InputOptions {
        InputOptions {
            swap_buttons: self.swap_buttons,
            difficulty_switches: self.difficulty_switches,
            difficulty_display: self.difficulty_display.into(),
            lightgun_crosshair: self.lightgun_crosshair,
        }
    }

    pub fn pacer_options(&self) -> PacerOptions {
        PacerOptions {
            max_frame_rate: (self.max_frame_rate > 0.0).then_some(self.max_frame_rate),
            show_fps: self.show_fps,
        }
    }
}
