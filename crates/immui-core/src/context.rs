//! Borrowed views handed to layout and widget kinds.

use immui_foundation::{InputState, Key, PointerButton};
use immui_render_common::{text_width, GlyphMetrics, Renderer};
use immui_ui_graphics::{FontId, Point, Rect, Size};

use crate::focus::{FocusRecord, FocusRouter};
use crate::id::Id;
use crate::tree::WidgetHeader;

/// Environment for one [`LayoutKind::compute_bounds`](crate::LayoutKind::compute_bounds) call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutContext {
    /// Absolute rectangle of the parent being laid out.
    pub parent_bounds: Rect,
    /// One device pixel in viewport units.
    pub pixel_size: Size,
    /// Viewport width over height.
    pub aspect: f32,
}

impl LayoutContext {
    /// One device pixel as a fraction of the parent on each axis.
    pub fn pixel_fraction(&self) -> Size {
        Size::new(
            ratio(self.pixel_size.width, self.parent_bounds.width),
            ratio(self.pixel_size.height, self.parent_bounds.height),
        )
    }
}

fn ratio(value: f32, extent: f32) -> f32 {
    if extent > 0.0 {
        value / extent
    } else {
        0.0
    }
}

/// Environment for [`WidgetKind::update`](crate::WidgetKind::update).
pub struct UpdateContext<'a> {
    pub input: &'a InputState,
    /// Mouse position in viewport units.
    pub mouse: Point,
    pub parent: Id,
    pub parent_bounds: Rect,
    pub parent_visible: Rect,
    pub frame_time: f32,
    pub aspect: f32,
    pub metrics: &'a dyn GlyphMetrics,
    pub(crate) hover_allowed: bool,
    pub(crate) focus: &'a mut FocusRouter,
}

impl<'a> UpdateContext<'a> {
    /// True when the mouse is over `bounds`, inside the parent's visible
    /// area, and not covered by an unrelated popup.
    pub fn mouse_over(&self, bounds: &Rect) -> bool {
        self.hover_allowed && self.parent_visible.contains(self.mouse) && bounds.contains(self.mouse)
    }

    pub fn pressed(&self, button: PointerButton) -> bool {
        self.input.was_pressed(button)
    }

    pub fn released(&self, button: PointerButton) -> bool {
        self.input.was_released(button)
    }

    pub fn down(&self, button: PointerButton) -> bool {
        self.input.is_down(button)
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.input.key_pressed(key)
    }

    pub fn text(&self) -> &str {
        &self.input.text
    }

    pub fn set_focus(&mut self, widget: &WidgetHeader, action: u32) {
        self.focus.set(widget, self.parent, action);
    }

    pub fn free_focus(&mut self) {
        self.focus.free();
    }

    pub fn is_focused(&self, widget: Id) -> bool {
        self.focus.is_focused(widget)
    }

    pub fn focus(&self) -> Option<FocusRecord> {
        self.focus.record()
    }
}

/// Environment for [`WidgetKind::draw`](crate::WidgetKind::draw).
pub struct DrawContext<'a> {
    pub renderer: &'a mut dyn Renderer,
    pub metrics: &'a dyn GlyphMetrics,
    pub font: FontId,
    pub aspect: f32,
    pub pixel_size: Size,
    pub focused: Option<Id>,
}

impl<'a> DrawContext<'a> {
    pub fn has_focus(&self, widget: Id) -> bool {
        self.focused == Some(widget)
    }

    /// Width of `text` in viewport units at `line_height`.
    pub fn text_width(&self, text: &str, line_height: f32) -> f32 {
        text_width(self.metrics, self.font, text, line_height, self.aspect)
    }
}
