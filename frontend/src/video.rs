use beamline_core::core::{Display, Overlay};
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};

use crate::error::{FrontendError, sdl};
use crate::overlay;

pub struct Video {
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    width: u32,
    height: u32,
    /// Frame plus overlay, so the console's buffer is never drawn on.
    composed: Vec<u8>,
}

impl Video {
    /// Create an SDL window and renderer for the given native resolution.
    pub fn new(
        sdl_video: &sdl2::VideoSubsystem,
        title: &str,
        native_width: u32,
        native_height: u32,
        scale: u32,
    ) -> Result<Self, FrontendError> {
        let window = sdl_video
            .window(title, native_width * scale, native_height * scale)
            .position_centered()
            .resizable()
            .build()
            .map_err(sdl)?;

        let canvas = window.into_canvas().accelerated().build().map_err(sdl)?;
        let texture_creator = canvas.texture_creator();

        Ok(Self {
            canvas,
            texture_creator,
            width: native_width,
            height: native_height,
            composed: vec![0; (native_width * native_height * 3) as usize],
        })
    }

    /// Current window size in screen pixels.
    pub fn window_size(&self) -> (u32, u32) {
        self.canvas.window().size()
    }

    /// Upload an RGB24 framebuffer to the texture and present it.
    fn upload(&mut self) -> Result<(), FrontendError> {
        let mut texture = self
            .texture_creator
            .create_texture_streaming(PixelFormatEnum::RGB24, self.width, self.height)
            .map_err(sdl)?;

        texture
            .update(None, &self.composed, (self.width * 3) as usize)
            .map_err(sdl)?;

        self.canvas.clear();
        self.canvas.copy(&texture, None, None).map_err(sdl)?;
        self.canvas.present();
        Ok(())
    }
}

impl Display for Video {
    fn sync_available(&self) -> bool {
        // Presentation is not vsynced; the frame timer paces the loop.
        true
    }

    fn present(&mut self, frame: &[u8], overlay: &Overlay) {
        let len = self.composed.len().min(frame.len());
        self.composed[..len].copy_from_slice(&frame[..len]);
        overlay::apply(&mut self.composed, self.width as usize, self.height as usize, overlay);
        if let Err(e) = self.upload() {
            log::warn!("failed to present frame: {e}");
        }
    }
}
