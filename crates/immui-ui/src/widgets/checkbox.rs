use std::any::Any;

use immui_core::{
    payload, DrawContext, GuiError, PropertyTag, PropertyValue, UpdateContext, Widget, WidgetHeader, WidgetKind,
};
use immui_render_common::TextAlign;
use immui_ui_graphics::Rect;

use super::press_release;
use crate::style::{draw_text_line, WidgetStyle};

#[derive(Clone, Debug, PartialEq)]
pub struct CheckboxPayload {
    pub label: String,
    pub checked: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CheckboxState {
    pub label: String,
    pub checked: bool,
    pub style: WidgetStyle,
    pub hovered: bool,
    pub toggled: bool,
}

/// Box on the left of a label; clicking anywhere on the widget toggles it.
#[derive(Default)]
pub struct CheckboxKind {
    pub style: WidgetStyle,
}

impl CheckboxKind {
    pub const NAME: &'static str = "checkbox";
}

/// Square box at the left edge of `bounds`, as tall as the widget.
fn check_box(bounds: Rect, aspect: f32) -> Rect {
    let side = bounds.height * 0.7;
    let width = if aspect > 0.0 { side / aspect } else { side };
    Rect::new(
        bounds.x + bounds.height * 0.15 / aspect.max(f32::EPSILON),
        bounds.y + bounds.height * 0.15,
        width,
        side,
    )
}

impl WidgetKind for CheckboxKind {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn payload_size(&self) -> usize {
        std::mem::size_of::<CheckboxPayload>()
    }

    fn read(&self, _header: &WidgetHeader, data: Box<dyn Any>) -> Result<Box<dyn Any>, GuiError> {
        let CheckboxPayload { label, checked } = payload(data, Self::NAME)?;
        Ok(Box::new(CheckboxState {
            label,
            checked,
            style: self.style,
            hovered: false,
            toggled: false,
        }))
    }

    fn update(&self, cx: &mut UpdateContext<'_>, widget: &mut Widget, has_focus: bool) {
        let header = widget.header;
        let Some(state) = widget.state_mut::<CheckboxState>() else {
            return;
        };
        let press = press_release(cx, &header, has_focus);
        state.hovered = press.hovered;
        state.toggled = press.fired;
    }

    fn draw(&self, cx: &mut DrawContext<'_>, widget: &Widget) {
        let Some(state) = widget.state::<CheckboxState>() else {
            return;
        };
        let bounds = widget.bounds();
        let square = check_box(bounds, cx.aspect);
        cx.renderer
            .draw_filled_rect(square, state.style.fill(state.hovered, false));
        if state.checked {
            let inset_x = square.width * 0.25;
            let inset_y = square.height * 0.25;
            let mark = Rect::new(
                square.x + inset_x,
                square.y + inset_y,
                square.width - 2.0 * inset_x,
                square.height - 2.0 * inset_y,
            );
            cx.renderer.draw_filled_rect(mark, state.style.foreground);
        }
        let text_x = square.right() + square.width * 0.5;
        let text = Rect::new(text_x, bounds.y, (bounds.right() - text_x).max(0.0), bounds.height);
        draw_text_line(cx, text, &state.label, &state.style, TextAlign::Left);
    }

    fn apply_property(&mut self, tag: PropertyTag, value: PropertyValue) -> Result<PropertyValue, GuiError> {
        self.style.apply(Self::NAME, tag, value)
    }

    fn describe(&self, widget: &Widget) -> String {
        widget
            .state::<CheckboxState>()
            .map(|state| format!("{:?} checked={}", state.label, state.checked))
            .unwrap_or_default()
    }
}
