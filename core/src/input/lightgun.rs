//! Light-gun pointer to beam position mapping.
//!
//! The video chip detects a light-gun hit by comparing the aimed position,
//! as a (scanline, cycle) pair, against the beam while it generates the
//! frame. The mapper converts a display-space pointer into that pair.

use log::trace;

use crate::core::cartridge::{CartridgeInfo, Region};
use crate::core::timing::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FrameGeometry, VideoTiming};

/// Cycles of each scanline over which the chip checks for a hit.
pub const LG_CYCLES_PER_SCANLINE: f32 = 318.0;

/// Cycles after horizontal blank before hit checking starts.
pub const LG_CYCLES_INDENT: f32 = 52.0;

/// Reticle arm length (pixels, both arms).
pub const CROSSHAIR_SIZE: i32 = 11;

/// Distance from the reticle's corner to its centre.
pub const CROSSHAIR_OFFSET: i32 = 5;

/// PAL frames are blitted 28 lines lower than the gun's reference row.
const PAL_ROW_ADJUST: i32 = 28;

/// Result of one mapper update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightgunSample {
    /// (scanline, cycle); unset until the first on-screen pointer.
    pub aim: Option<(i32, f32)>,
    pub trigger: bool,
}

#[derive(Clone, Debug)]
pub struct LightgunMapper {
    enabled: bool,
    first_fire_seen: bool,
    aim: Option<(i32, f32)>,
    pointer: Option<(i32, i32)>,
    timing: VideoTiming,
    frame: FrameGeometry,
    region: Region,
    crosshair_x: i32,
    crosshair_y: i32,
}

impl LightgunMapper {
    /// Mapper for a loaded cartridge; enabled iff port 0 declares a light
    /// gun.
    pub fn new(cart: &CartridgeInfo, timing: VideoTiming) -> Self {
        Self {
            enabled: cart.lightgun(),
            first_fire_seen: false,
            aim: None,
            pointer: None,
            timing,
            frame: FrameGeometry::for_region(cart.region),
            region: cart.region,
            crosshair_x: cart.crosshair_x,
            crosshair_y: cart.crosshair_y,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn first_fire_seen(&self) -> bool {
        self.first_fire_seen
    }

    /// Last computed aim point, `None` until a pointer has been on screen.
    pub fn aim(&self) -> Option<(i32, f32)> {
        self.aim
    }

    /// Require a fresh trigger release before the live trigger is reported
    /// again.
    pub fn rearm(&mut self) {
        self.first_fire_seen = false;
    }

    /// Map a pointer and trigger sample for this frame.
    ///
    /// A pointer outside the 640x480 display leaves the previous aim point
    /// in place and hides the reticle.
    pub fn update(&mut self, pointer: Option<(i32, i32)>, trigger_held: bool) -> LightgunSample {
        let trigger = if self.enabled { self.trigger(trigger_held) } else { false };
        self.pointer = pointer.filter(|&(x, y)| on_display(x, y));

        if self.enabled
            && let Some((x, y)) = self.pointer
        {
            let (scanline, cycle) = self.map(x, y);
            self.aim = Some((scanline, cycle));
            trace!("lightgun: pointer ({x}, {y}) -> scanline {scanline}, cycle {cycle:.2}");
        }

        LightgunSample { aim: self.aim, trigger }
    }

    /// First-fire gating: forced true until the trigger is seen released.
    pub fn trigger(&mut self, held: bool) -> bool {
        if self.first_fire_seen {
            held
        } else {
            if !held {
                self.first_fire_seen = true;
            }
            true
        }
    }

    /// Convert a display-space pointer into (scanline, cycle).
    pub fn map(&self, x: i32, y: i32) -> (i32, f32) {
        let (x, y) = self.offset_point(x, y);
        let (x, y) = (x as f32, y as f32);

        let row_offset = match self.region {
            Region::Ntsc => self.frame.blit_top as i32,
            Region::Pal => self.frame.blit_top as i32 - PAL_ROW_ADJUST,
        };
        let area_offset = self.timing.visible_top as i32 - self.timing.display_top as i32 + 1;

        let y_ratio = self.frame.height as f32 / DISPLAY_HEIGHT as f32;
        let x_ratio = LG_CYCLES_PER_SCANLINE / DISPLAY_WIDTH as f32;

        let mut scanline = (y * y_ratio + (area_offset + row_offset) as f32) as i32;
        let mut cycle = self.timing.hblank_cycles as f32 + LG_CYCLES_INDENT + x * x_ratio;

        let per_line = self.timing.cycles_per_scanline as f32;
        let carry = (cycle / per_line).floor();
        scanline += carry as i32;
        cycle -= carry * per_line;
        (scanline, cycle)
    }

    /// Pointer shifted by the cartridge's crosshair offset, kept on the
    /// display.
    fn offset_point(&self, x: i32, y: i32) -> (i32, i32) {
        (
            (x + self.crosshair_x).clamp(0, DISPLAY_WIDTH as i32 - 1),
            (y + self.crosshair_y).clamp(0, DISPLAY_HEIGHT as i32 - 1),
        )
    }

    /// Reticle centre in frame-buffer coordinates, if the pointer is valid.
    pub fn crosshair(&self) -> Option<(i32, i32)> {
        if !self.enabled {
            return None;
        }
        let (x, y) = self.pointer?;
        let (x, y) = self.offset_point(x, y);
        let x_ratio = self.frame.width as f32 / DISPLAY_WIDTH as f32;
        let y_ratio = self.frame.height as f32 / DISPLAY_HEIGHT as f32;
        let cx = ((x - CROSSHAIR_OFFSET) as f32 * x_ratio) as i32;
        let cy = ((y - CROSSHAIR_OFFSET) as f32 * y_ratio) as i32;
        Some((cx + CROSSHAIR_OFFSET, cy + CROSSHAIR_OFFSET))
    }
}

fn on_display(x: i32, y: i32) -> bool {
    (0..DISPLAY_WIDTH as i32).contains(&x) && (0..DISPLAY_HEIGHT as i32).contains(&y)
}
