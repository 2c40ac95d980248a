//! Software renderer drawing immui frames into an RGBA8 buffer.
//!
//! The buffer layout matches what the `pixels` crate expects from
//! `Pixels::frame_mut`, so a host can copy it straight to the surface.

mod error;
mod image;
mod raster;
mod text;

pub use error::RenderError;
pub use image::{Image, ImageStore};
pub use text::{env_font_bytes, FontMetrics, FontSet, FONT_ENV_VAR};

use immui_render_common::{Renderer, TextAlign, TextTransform};
use immui_ui_graphics::{Color, FontId, ImageId, Rect};

use raster::{PixelRect, Target};

/// Background used by [`PixelsRenderer::clear`] unless changed.
pub const DEFAULT_CLEAR_COLOR: Color = Color(18.0 / 255.0, 18.0 / 255.0, 24.0 / 255.0, 1.0);

pub struct PixelsRenderer {
    width: u32,
    height: u32,
    frame: Vec<u8>,
    clear_color: Color,
    scissors: Vec<Rect>,
    images: ImageStore,
    fonts: FontSet,
}

impl PixelsRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        let mut renderer = Self {
            width,
            height,
            frame: vec![0; width as usize * height as usize * 4],
            clear_color: DEFAULT_CLEAR_COLOR,
            scissors: Vec::new(),
            images: ImageStore::default(),
            fonts: FontSet::default(),
        };
        renderer.clear();
        renderer
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.frame = vec![0; width as usize * height as usize * 4];
        self.clear();
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// Fills the buffer with the clear colour and drops any scissor left
    /// from the previous frame.
    pub fn clear(&mut self) {
        if !self.scissors.is_empty() {
            log::warn!("{} scissors still pushed at clear", self.scissors.len());
            self.scissors.clear();
        }
        let rgba = self.clear_color.to_rgba8();
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&rgba);
        }
    }

    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// RGBA of one pixel, `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize * self.width as usize + x as usize) * 4;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.frame[index..index + 4]);
        Some(rgba)
    }

    /// Copies the buffer into a surface frame of the same size.
    pub fn copy_to(&self, target: &mut [u8]) -> Result<(), RenderError> {
        if target.len() != self.frame.len() {
            return Err(RenderError::SizeMismatch {
                expected: self.frame.len(),
                found: target.len(),
            });
        }
        target.copy_from_slice(&self.frame);
        Ok(())
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut ImageStore {
        &mut self.images
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    pub fn fonts_mut(&mut self) -> &mut FontSet {
        &mut self.fonts
    }

    /// Glyph metrics matching the fonts loaded so far, for
    /// `Gui::set_glyph_metrics`.
    pub fn metrics(&self) -> FontMetrics {
        self.fonts.metrics()
    }

    fn scissor(&self) -> Rect {
        self.scissors.last().copied().unwrap_or(Rect::UNIT)
    }

    fn target(&mut self) -> Target<'_> {
        let clip = PixelRect::from_viewport(self.scissor(), self.width, self.height);
        Target::new(&mut self.frame, self.width, self.height, clip)
    }
}

impl Renderer for PixelsRenderer {
    fn draw_filled_rect(&mut self, bounds: Rect, color: Color) {
        let (width, height) = (self.width, self.height);
        self.target()
            .fill(PixelRect::from_viewport(bounds, width, height), color);
    }

    fn draw_textured_rect(&mut self, bounds: Rect, color: Color, image: ImageId, texcoords: Rect) {
        let (width, height) = (self.width, self.height);
        let area = PixelRect::from_viewport(bounds, width, height);
        match self.images.get(image).cloned() {
            Some(source) => self.target().blit(area, &source, texcoords, color),
            None => {
                log::debug!("image {} is not registered, drawing a flat quad", image.0);
                self.target().fill(area, color);
            }
        }
    }

    fn draw_text(
        &mut self,
        text: &str,
        transform: TextTransform,
        alignment: TextAlign,
        max_lines: u32,
        font: FontId,
        colors: &[Color],
    ) {
        let fonts = self.fonts.clone();
        let mut target = self.target();
        fonts.draw(&mut target, text, transform, alignment, max_lines, font, colors);
    }

    fn push_scissor(&mut self, bounds: Rect, additive: bool) {
        let next = if additive {
            self.scissor().intersect(&bounds).unwrap_or(Rect::ZERO)
        } else {
            bounds
        };
        self.scissors.push(next);
    }

    fn pop_scissor(&mut self) {
        if self.scissors.pop().is_none() {
            log::warn!("pop_scissor without a matching push_scissor");
        }
    }
}

#[cfg(test)]
#[path = "tests/renderer_tests.rs"]
mod tests;
