//! Pixel-space fills and blits with source-over blending.

use immui_ui_graphics::{Color, Rect};

use crate::image::Image;

/// Half-open pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PixelRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl PixelRect {
    /// Pixels whose centres fall inside `rect`.
    pub fn from_viewport(rect: Rect, width: u32, height: u32) -> Self {
        let (w, h) = (width as f32, height as f32);
        Self {
            x0: (rect.x * w).round() as i32,
            y0: (rect.y * h).round() as i32,
            x1: (rect.right() * w).round() as i32,
            y1: (rect.bottom() * h).round() as i32,
        }
    }

    pub fn intersect(self, other: PixelRect) -> PixelRect {
        PixelRect {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }

    pub fn is_empty(self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    pub fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

/// Mutable view of the frame restricted to the active scissor.
pub(crate) struct Target<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
    clip: PixelRect,
}

impl<'a> Target<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32, clip: PixelRect) -> Self {
        let screen = PixelRect {
            x0: 0,
            y0: 0,
            x1: width as i32,
            y1: height as i32,
        };
        Self {
            frame,
            width,
            height,
            clip: clip.intersect(screen),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fill(&mut self, area: PixelRect, color: Color) {
        if color.a() <= 0.0 {
            return;
        }
        let area = area.intersect(self.clip);
        if area.is_empty() {
            return;
        }
        for y in area.y0..area.y1 {
            for x in area.x0..area.x1 {
                self.blend(x, y, color, 1.0);
            }
        }
    }

    /// Draws `texcoords` of `image` stretched over `area`, tinted by `tint`.
    pub fn blit(&mut self, area: PixelRect, image: &Image, texcoords: Rect, tint: Color) {
        let visible = area.intersect(self.clip);
        if visible.is_empty() {
            return;
        }
        let (span_x, span_y) = ((area.x1 - area.x0) as f32, (area.y1 - area.y0) as f32);
        for y in visible.y0..visible.y1 {
            let v = texcoords.y + texcoords.height * ((y - area.y0) as f32 + 0.5) / span_y;
            for x in visible.x0..visible.x1 {
                let u = texcoords.x + texcoords.width * ((x - area.x0) as f32 + 0.5) / span_x;
                self.blend(x, y, image.sample(u, v).modulate(tint), 1.0);
            }
        }
    }

    /// Blends one pixel with `coverage` in `[0, 1]`, honouring the clip.
    pub fn blend(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if !self.clip.contains(x, y) {
            return;
        }
        let alpha = (color.a() * coverage).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let index = (y as usize * self.width as usize + x as usize) * 4;
        let existing = &mut self.frame[index..index + 4];
        let source = [color.r(), color.g(), color.b()];
        for (channel, src) in existing.iter_mut().zip(source) {
            let dst = *channel as f32 / 255.0;
            let blended = src.clamp(0.0, 1.0) * alpha + dst * (1.0 - alpha);
            *channel = (blended.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        let dst_alpha = existing[3] as f32 / 255.0;
        let out_alpha = alpha + dst_alpha * (1.0 - alpha);
        existing[3] = (out_alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
}
