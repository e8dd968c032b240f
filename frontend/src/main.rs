use std::path::PathBuf;
use std::process::ExitCode;

use beamline_core::core::Region;
use beamline_machines::registry;
use clap::{Parser, ValueEnum};

mod audio;
mod battery;
mod config;
mod emulator;
mod error;
mod input;
mod overlay;
mod video;

use battery::FileBatteryStore;
use config::Settings;
use error::FrontendError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum RegionArg {
    Ntsc,
    Pal,
}

impl From<RegionArg> for Region {
    fn from(region: RegionArg) -> Self {
        match region {
            RegionArg::Ntsc => Region::Ntsc,
            RegionArg::Pal => Region::Pal,
        }
    }
}

/// Host front-end for the beamline console emulator.
#[derive(Debug, Parser)]
#[command(name = "beamline", version)]
struct Cli {
    /// Machine to run (see --list).
    machine: Option<String>,

    /// Television standard of the cartridge.
    #[arg(long, value_enum, default_value = "ntsc")]
    region: RegionArg,

    /// Integer window scale.
    #[arg(long)]
    scale: Option<u32>,

    /// Run N frames silently before going interactive.
    #[arg(long, value_name = "N")]
    fast_forward: Option<u32>,

    /// Exchange the two fire buttons.
    #[arg(long)]
    swap_buttons: bool,

    /// Show the achieved frame rate.
    #[arg(long)]
    show_fps: bool,

    /// Battery RAM file (defaults to the user data directory).
    #[arg(long, value_name = "PATH")]
    battery: Option<PathBuf>,

    /// Settings file (defaults to the user config directory).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// List available machines and exit.
    #[arg(long)]
    list: bool,
}

impl Cli {
    /// Command-line flags take precedence over the settings file.
    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(scale) = self.scale {
            settings.scale = scale;
        }
        settings.swap_buttons |= self.swap_buttons;
        settings.show_fps |= self.show_fps;
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("beamline: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), FrontendError> {
    if cli.list {
        for entry in registry::all() {
            println!("{:<12} {}", entry.name, entry.description);
        }
        return Ok(());
    }

    let machine_name = cli.machine.as_deref().ok_or(FrontendError::NoMachine)?;
    let entry = registry::find(machine_name).ok_or_else(|| FrontendError::UnknownMachine {
        name: machine_name.to_string(),
        available: registry::all()
            .iter()
            .map(|e| e.name)
            .collect::<Vec<_>>()
            .join(", "),
    })?;

    let mut settings = match cli.config.clone().or_else(Settings::default_path) {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };
    cli.apply_overrides(&mut settings);

    let mut console = (entry.create)(cli.region.into());

    // Load battery-backed RAM from disk (if available)
    let mut battery = FileBatteryStore::new(
        cli.battery
            .clone()
            .or_else(|| FileBatteryStore::default_path(machine_name)),
    );
    if let Some(data) = battery.load() {
        console.load_battery_ram(&data);
    }
    if battery.path().is_none() {
        log::warn!("no battery RAM location; progress will not be saved");
    }

    console.reset();
    emulator::run(console.as_mut(), &settings, cli.fast_forward, &mut battery)
}
