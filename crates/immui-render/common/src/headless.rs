use immui_ui_graphics::{Color, FontId, ImageId, Rect};

use crate::{Renderer, TextAlign, TextTransform};

/// A draw call captured by [`HeadlessRenderer`].
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOp {
    FilledRect {
        bounds: Rect,
        color: Color,
    },
    TexturedRect {
        bounds: Rect,
        color: Color,
        image: ImageId,
        texcoords: Rect,
    },
    Text {
        value: String,
        transform: TextTransform,
        alignment: TextAlign,
        max_lines: u32,
        font: FontId,
        color: Color,
    },
    PushScissor {
        bounds: Rect,
        additive: bool,
    },
    PopScissor,
}

/// A collection of render operations for one draw pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordedRenderScene {
    operations: Vec<RenderOp>,
}

impl RecordedRenderScene {
    pub fn new(operations: Vec<RenderOp>) -> Self {
        Self { operations }
    }

    /// Returns a slice of recorded render operations in submission order.
    pub fn operations(&self) -> &[RenderOp] {
        &self.operations
    }

    pub fn into_operations(self) -> Vec<RenderOp> {
        self.operations
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.operations.iter().filter_map(|op| match op {
            RenderOp::Text { value, .. } => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn filled_rects(&self) -> impl Iterator<Item = (Rect, Color)> + '_ {
        self.operations.iter().filter_map(|op| match op {
            RenderOp::FilledRect { bounds, color } => Some((*bounds, *color)),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text == needle)
    }
}

/// Renderer that records every call instead of rasterizing, for tests and
/// debug dumps.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    operations: Vec<RenderOp>,
    scissor_depth: usize,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scissor_depth(&self) -> usize {
        self.scissor_depth
    }

    pub fn clear(&mut self) {
        self.operations.clear();
        self.scissor_depth = 0;
    }

    /// Takes the recorded operations, leaving the renderer empty.
    pub fn take_scene(&mut self) -> RecordedRenderScene {
        self.scissor_depth = 0;
        RecordedRenderScene::new(std::mem::take(&mut self.operations))
    }
}

impl Renderer for HeadlessRenderer {
    fn draw_filled_rect(&mut self, bounds: Rect, color: Color) {
        self.operations.push(RenderOp::FilledRect { bounds, color });
    }

    fn draw_textured_rect(&mut self, bounds: Rect, color: Color, image: ImageId, texcoords: Rect) {
        self.operations.push(RenderOp::TexturedRect {
            bounds,
            color,
            image,
            texcoords,
        });
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
        self.operations.push(RenderOp::Text {
            value: text.to_string(),
            transform,
            alignment,
            max_lines,
            font,
            color: colors.first().copied().unwrap_or(Color::WHITE),
        });
    }

    fn push_scissor(&mut self, bounds: Rect, additive: bool) {
        self.scissor_depth += 1;
        self.operations
            .push(RenderOp::PushScissor { bounds, additive });
    }

    fn pop_scissor(&mut self) {
        if self.scissor_depth == 0 {
            log::warn!("pop_scissor without a matching push_scissor");
            return;
        }
        self.scissor_depth -= 1;
        self.operations.push(RenderOp::PopScissor);
    }
}
