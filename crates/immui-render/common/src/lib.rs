//! Common rendering contracts shared between renderer backends.
//!
//! The GUI core never touches GPU resources. It talks to the batched
//! quad/text renderer through [`Renderer`] and asks the font rasterizer for
//! glyph advances through [`GlyphMetrics`].

mod headless;
mod metrics;

pub use headless::{HeadlessRenderer, RecordedRenderScene, RenderOp};
pub use metrics::{text_width, Glyph, GlyphMetrics, MonospaceMetrics};

use immui_ui_graphics::{Color, FontId, ImageId, Rect};

/// Horizontal placement of a text run inside its bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Where and how large a text run is drawn, in viewport units.
///
/// Lines start at the top of `bounds` unless the whole run fits, in which
/// case it is centered vertically.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextTransform {
    pub bounds: Rect,
    pub line_height: f32,
}

impl TextTransform {
    pub fn new(bounds: Rect, line_height: f32) -> Self {
        Self {
            bounds,
            line_height,
        }
    }
}

/// Narrow surface of the immediate-mode quad/text renderer.
///
/// `colors` passed to [`Renderer::draw_text`] holds one color per line; the
/// last entry repeats for the remaining lines.
pub trait Renderer {
    fn draw_filled_rect(&mut self, bounds: Rect, color: Color);

    fn draw_textured_rect(&mut self, bounds: Rect, color: Color, image: ImageId, texcoords: Rect);

    fn draw_text(
        &mut self,
        text: &str,
        transform: TextTransform,
        alignment: TextAlign,
        max_lines: u32,
        font: FontId,
        colors: &[Color],
    );

    /// Restricts drawing to `bounds`. An additive scissor intersects with the
    /// current one, a non-additive scissor replaces it.
    fn push_scissor(&mut self, bounds: Rect, additive: bool);

    fn pop_scissor(&mut self);
}
