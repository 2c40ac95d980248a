use immui_ui_graphics::FontId;

/// Metrics of a single glyph, expressed in line heights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    pub advance: f32,
    pub width: f32,
    pub height: f32,
}

/// Glyph lookup provided by the font rasterizer.
pub trait GlyphMetrics {
    fn glyph(&self, font: FontId, ch: char) -> Glyph;

    /// Width of `text` in line heights.
    fn measure(&self, font: FontId, text: &str) -> f32 {
        text.chars().map(|ch| self.glyph(font, ch).advance).sum()
    }
}

/// Fixed-advance metrics used when no font has been baked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMetrics {
    pub advance: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self { advance: 0.5 }
    }
}

impl GlyphMetrics for MonospaceMetrics {
    fn glyph(&self, _font: FontId, ch: char) -> Glyph {
        let advance = if ch == '\n' { 0.0 } else { self.advance };
        Glyph {
            advance,
            width: advance,
            height: 1.0,
        }
    }
}

/// Width of `text` in horizontal viewport units for a given line height
/// (vertical viewport units) and viewport aspect ratio.
pub fn text_width(
    metrics: &dyn GlyphMetrics,
    font: FontId,
    text: &str,
    line_height: f32,
    aspect: f32,
) -> f32 {
    if aspect <= 0.0 {
        return 0.0;
    }
    metrics.measure(font, text) * line_height / aspect
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monospace_width_scales_with_line_height_and_aspect() {
        let metrics = MonospaceMetrics::default();
        let width = text_width(&metrics, FontId::DEFAULT, "abcd", 0.1, 2.0);
        assert!((width - 0.1).abs() < 1e-6);
    }
}
