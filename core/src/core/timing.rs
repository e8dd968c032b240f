use super::cartridge::Region;

/// Width of the emulated frame buffer in pixels.
pub const FRAME_WIDTH: u32 = 320;

/// Host display space that pointer coordinates are reported in.
pub const DISPLAY_WIDTH: u32 = 640;
pub const DISPLAY_HEIGHT: u32 = 480;

/// Video chip timing constants exposed by the emulation core.
///
/// `visible_top` and `display_top` are the first scanline of the visible
/// area and of the rendered display area; their difference positions
/// pointer rows against the chip's scanline counter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VideoTiming {
    /// Total CPU-visible cycles per scanline, including horizontal blank.
    pub cycles_per_scanline: u32,
    /// Cycles spent in horizontal blank at the start of each scanline.
    pub hblank_cycles: u32,
    pub visible_top: u32,
    pub display_top: u32,
}

impl VideoTiming {
    pub const NTSC: VideoTiming = VideoTiming {
        cycles_per_scanline: 454,
        hblank_cycles: 136,
        visible_top: 26,
        display_top: 16,
    };

    pub const PAL: VideoTiming = VideoTiming {
        cycles_per_scanline: 454,
        hblank_cycles: 136,
        visible_top: 26,
        display_top: 16,
    };

    pub fn for_region(region: Region) -> Self {
        match region {
            Region::Ntsc => Self::NTSC,
            Region::Pal => Self::PAL,
        }
    }
}

/// Emulated frame geometry for a region: how many scanlines are blitted to
/// the host and where the blit starts within the rendered buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameGeometry {
    pub width: u32,
    pub height: u32,
    pub blit_top: u32,
}

impl FrameGeometry {
    pub fn for_region(region: Region) -> Self {
        match region {
            Region::Ntsc => Self {
                width: FRAME_WIDTH,
                height: 223,
                blit_top: 2,
            },
            Region::Pal => Self {
                width: FRAME_WIDTH,
                height: 272,
                blit_top: 26,
            },
        }
    }
}
