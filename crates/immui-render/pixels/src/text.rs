//! Text rasterization with rusttype, falling back to block glyphs when no
//! font has been loaded.

use std::path::Path;
use std::sync::Arc;

use immui_render_common::{Glyph, GlyphMetrics, MonospaceMetrics, TextAlign, TextTransform};
use immui_ui_graphics::{Color, FontId};
use once_cell::sync::Lazy;
use rusttype::{point, Font, Scale};

use crate::raster::{PixelRect, Target};
use crate::RenderError;

/// Environment variable naming a TrueType file to use as the default font.
pub const FONT_ENV_VAR: &str = "IMMUI_FONT";

static ENV_FONT: Lazy<Option<Vec<u8>>> = Lazy::new(|| {
    let path = std::env::var_os(FONT_ENV_VAR)?;
    match std::fs::read(&path) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            log::error!("failed to read {FONT_ENV_VAR} font {path:?}: {err}");
            None
        }
    }
});

/// Bytes of the font named by `IMMUI_FONT`, read once per process.
pub fn env_font_bytes() -> Option<&'static [u8]> {
    ENV_FONT.as_deref()
}

/// Fonts indexed by [`FontId`]. Cloning shares the parsed fonts.
#[derive(Clone, Default)]
pub struct FontSet {
    fonts: Arc<Vec<Font<'static>>>,
}

impl FontSet {
    pub fn load_bytes(&mut self, bytes: Vec<u8>) -> Result<FontId, RenderError> {
        let font = Font::try_from_vec(bytes).ok_or(RenderError::InvalidFont)?;
        Arc::make_mut(&mut self.fonts).push(font);
        Ok(FontId(self.fonts.len() as u32 - 1))
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<FontId, RenderError> {
        let bytes = std::fs::read(path.as_ref())?;
        self.load_bytes(bytes)
    }

    /// Loads the `IMMUI_FONT` font if the variable is set and readable.
    pub fn load_env_font(&mut self) -> Option<FontId> {
        let bytes = env_font_bytes()?;
        match self.load_bytes(bytes.to_vec()) {
            Ok(id) => Some(id),
            Err(err) => {
                log::error!("{FONT_ENV_VAR}: {err}");
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Unknown ids resolve to the default font.
    fn font(&self, id: FontId) -> Option<&Font<'static>> {
        self.fonts
            .get(id.0 as usize)
            .or_else(|| self.fonts.first())
    }

    pub fn metrics(&self) -> FontMetrics {
        FontMetrics {
            fonts: self.clone(),
        }
    }

    fn glyph(&self, font_id: FontId, ch: char) -> Glyph {
        if ch == '\n' {
            return Glyph {
                advance: 0.0,
                width: 0.0,
                height: 0.0,
            };
        }
        let Some(font) = self.font(font_id) else {
            return MonospaceMetrics::default().glyph(font_id, ch);
        };
        // Scale 1.0 makes pixel sizes equal to line heights.
        let scaled = font.glyph(ch).scaled(Scale::uniform(1.0));
        let advance = scaled.h_metrics().advance_width;
        let (width, height) = scaled
            .exact_bounding_box()
            .map(|bb| (bb.width(), bb.height()))
            .unwrap_or((0.0, 0.0));
        Glyph {
            advance,
            width,
            height,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn draw(
        &self,
        target: &mut Target<'_>,
        text: &str,
        transform: TextTransform,
        alignment: TextAlign,
        max_lines: u32,
        font_id: FontId,
        colors: &[Color],
    ) {
        let line_px = transform.line_height * target.height() as f32;
        if line_px <= 0.0 || text.is_empty() {
            return;
        }
        let bounds = PixelRect::from_viewport(transform.bounds, target.width(), target.height());
        let mut lines: Vec<&str> = text.split('\n').collect();
        if max_lines > 0 {
            lines.truncate(max_lines as usize);
        }
        let block_px = line_px * lines.len() as f32;
        let box_height = (bounds.y1 - bounds.y0) as f32;
        let top = if block_px <= box_height {
            bounds.y0 as f32 + (box_height - block_px) * 0.5
        } else {
            bounds.y0 as f32
        };

        for (index, line) in lines.iter().enumerate() {
            let color = colors
                .get(index)
                .or_else(|| colors.last())
                .copied()
                .unwrap_or(Color::WHITE);
            let line_width = line
                .chars()
                .map(|ch| self.glyph(font_id, ch).advance)
                .sum::<f32>()
                * line_px;
            let box_width = (bounds.x1 - bounds.x0) as f32;
            let left = match alignment {
                TextAlign::Left => bounds.x0 as f32,
                TextAlign::Center => bounds.x0 as f32 + (box_width - line_width) * 0.5,
                TextAlign::Right => bounds.x1 as f32 - line_width,
            };
            let baseline_top = top + index as f32 * line_px;
            match self.font(font_id) {
                Some(font) => draw_line(target, font, line, left, baseline_top, line_px, color),
                None => draw_block_line(target, line, left, baseline_top, line_px, color),
            }
        }
    }
}

fn draw_line(
    target: &mut Target<'_>,
    font: &Font<'static>,
    line: &str,
    left: f32,
    top: f32,
    line_px: f32,
    color: Color,
) {
    let scale = Scale::uniform(line_px);
    let v_metrics = font.v_metrics(scale);
    let origin = point(left, top + v_metrics.ascent);
    for glyph in font.layout(line, scale, origin) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                target.blend(bb.min.x + gx as i32, bb.min.y + gy as i32, color, coverage);
            });
        }
    }
}

/// Placeholder glyphs: one solid block per visible character.
fn draw_block_line(
    target: &mut Target<'_>,
    line: &str,
    left: f32,
    top: f32,
    line_px: f32,
    color: Color,
) {
    let advance = MonospaceMetrics::default().advance * line_px;
    let mut x = left;
    for ch in line.chars() {
        if !ch.is_whitespace() {
            let block = PixelRect {
                x0: (x + advance * 0.1).round() as i32,
                y0: (top + line_px * 0.2).round() as i32,
                x1: (x + advance * 0.9).round() as i32,
                y1: (top + line_px * 0.8).round() as i32,
            };
            target.fill(block, color);
        }
        x += advance;
    }
}

/// [`GlyphMetrics`] backed by the loaded fonts.
#[derive(Clone)]
pub struct FontMetrics {
    fonts: FontSet,
}

impl GlyphMetrics for FontMetrics {
    fn glyph(&self, font: FontId, ch: char) -> Glyph {
        self.fonts.glyph(font, ch)
    }
}
