use std::any::Any;

use immui_core::{
    payload, DrawContext, GuiError, PropertyTag, PropertyValue, UpdateContext, Widget, WidgetHeader, WidgetKind,
};
use immui_foundation::PointerButton;
use immui_render_common::TextAlign;
use immui_ui_graphics::Rect;

use super::ACTION_DRAG;
use crate::style::{draw_text_line, WidgetStyle};

/// Handle width as a fraction of the slider width.
pub const HANDLE_WIDTH: PropertyTag = PropertyTag(7);

#[derive(Clone, Debug, PartialEq)]
pub struct SliderPayload {
    pub label: String,
    pub value: f32,
    pub min: f32,
    pub max: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SliderState {
    pub label: String,
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub style: WidgetStyle,
    pub handle_width: f32,
    pub hovered: bool,
    pub dragging: bool,
}

impl SliderState {
    /// Position of the value along the track, in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        let span = self.max - self.min;
        if span.abs() <= f32::EPSILON {
            0.0
        } else {
            ((self.value - self.min) / span).clamp(0.0, 1.0)
        }
    }
}

/// Value under the mouse for a slider occupying `bounds`.
pub fn slider_value(bounds: Rect, mouse_x: f32, min: f32, max: f32) -> f32 {
    let t = if bounds.width > 0.0 {
        ((mouse_x - bounds.x) / bounds.width).clamp(0.0, 1.0)
    } else {
        0.0
    };
    min + t * (max - min)
}

/// Horizontal value slider dragged with the primary button.
pub struct SliderKind {
    pub style: WidgetStyle,
    pub handle_width: f32,
}

impl Default for SliderKind {
    fn default() -> Self {
        Self {
            style: WidgetStyle::default(),
            handle_width: 0.04,
        }
    }
}

impl SliderKind {
    pub const NAME: &'static str = "slider";
}

impl WidgetKind for SliderKind {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn payload_size(&self) -> usize {
        std::mem::size_of::<SliderPayload>()
    }

    fn read(&self, _header: &WidgetHeader, data: Box<dyn Any>) -> Result<Box<dyn Any>, GuiError> {
        let SliderPayload { label, value, min, max } = payload(data, Self::NAME)?;
        Ok(Box::new(SliderState {
            label,
            value,
            min,
            max,
            style: self.style,
            handle_width: self.handle_width,
            hovered: false,
            dragging: false,
        }))
    }

    fn update(&self, cx: &mut UpdateContext<'_>, widget: &mut Widget, has_focus: bool) {
        let header = widget.header;
        let hovered = cx.mouse_over(&header.bounds);
        let Some(state) = widget.state_mut::<SliderState>() else {
            return;
        };
        state.hovered = hovered;
        if has_focus {
            if cx.down(PointerButton::Primary) {
                state.dragging = true;
                state.value = slider_value(header.bounds, cx.mouse.x, state.min, state.max);
            } else {
                cx.free_focus();
            }
        } else if hovered && cx.pressed(PointerButton::Primary) {
            cx.set_focus(&header, ACTION_DRAG);
            state.dragging = true;
        }
    }

    fn draw(&self, cx: &mut DrawContext<'_>, widget: &Widget) {
        let Some(state) = widget.state::<SliderState>() else {
            return;
        };
        let bounds = widget.bounds();
        cx.renderer
            .draw_filled_rect(bounds, state.style.fill(state.hovered, false));
        let fraction = state.fraction();
        let filled = Rect::new(bounds.x, bounds.y, bounds.width * fraction, bounds.height);
        cx.renderer
            .draw_filled_rect(filled, state.style.active.with_alpha(0.5));
        let handle_width = bounds.width * state.handle_width;
        let handle = Rect::new(
            bounds.x + (bounds.width - handle_width) * fraction,
            bounds.y,
            handle_width,
            bounds.height,
        );
        let handle_color = if state.dragging {
            state.style.active
        } else {
            state.style.foreground
        };
        cx.renderer.draw_filled_rect(handle, handle_color);
        let text = format!("{}: {:.2}", state.label, state.value);
        draw_text_line(cx, bounds, &text, &state.style, TextAlign::Center);
    }

    fn apply_property(&mut self, tag: PropertyTag, value: PropertyValue) -> Result<PropertyValue, GuiError> {
        if tag == HANDLE_WIDTH {
            let old = std::mem::replace(&mut self.handle_width, value.as_float(tag)?);
            return Ok(PropertyValue::Float(old));
        }
        self.style.apply(Self::NAME, tag, value)
    }

    fn describe(&self, widget: &Widget) -> String {
        widget
            .state::<SliderState>()
            .map(|state| format!("{:?} value={:.3}", state.label, state.value))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_value_clamps_to_the_range() {
        let bounds = Rect::new(0.2, 0.0, 0.4, 0.1);
        assert_eq!(slider_value(bounds, 0.0, 1.0, 3.0), 1.0);
        assert_eq!(slider_value(bounds, 0.9, 1.0, 3.0), 3.0);
        assert!((slider_value(bounds, 0.4, 1.0, 3.0) - 2.0).abs() < 1e-5);
    }

    #[test]
    fn degenerate_range_has_zero_fraction() {
        let state = SliderState {
            label: String::new(),
            value: 2.0,
            min: 2.0,
            max: 2.0,
            style: WidgetStyle::default(),
            handle_width: 0.1,
            hovered: false,
            dragging: false,
        };
        assert_eq!(state.fraction(), 0.0);
    }
}
