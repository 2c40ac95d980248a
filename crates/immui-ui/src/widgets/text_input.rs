use std::any::Any;

use immui_core::{
    payload, DrawContext, GuiError, PropertyTag, PropertyValue, UpdateContext, Widget, WidgetHeader, WidgetKind,
};
use immui_foundation::{InputState, Key, PointerButton};
use immui_render_common::TextAlign;
use immui_ui_graphics::Rect;

use super::ACTION_EDIT;
use crate::style::{draw_text_line, WidgetStyle};

#[derive(Clone, Debug, PartialEq)]
pub struct TextInputPayload {
    pub text: String,
    pub hint: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextInputState {
    pub text: String,
    pub hint: String,
    pub style: WidgetStyle,
    pub hovered: bool,
    pub editing: bool,
}

/// Applies one frame of keyboard input to `text`: backspaces first, then
/// typed characters. Returns true when the text changed.
pub fn apply_text_input(text: &mut String, input: &InputState) -> bool {
    let mut changed = false;
    for key in &input.keys_pressed {
        if *key == Key::Backspace && text.pop().is_some() {
            changed = true;
        }
    }
    for ch in input.text.chars().filter(|ch| !ch.is_control()) {
        text.push(ch);
        changed = true;
    }
    changed
}

/// Single line text field. Clicking focuses it; Enter, Escape or a click
/// elsewhere ends editing.
#[derive(Default)]
pub struct TextInputKind {
    pub style: WidgetStyle,
}

impl TextInputKind {
    pub const NAME: &'static str = "text_input";
}

impl WidgetKind for TextInputKind {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn payload_size(&self) -> usize {
        std::mem::size_of::<TextInputPayload>()
    }

    fn read(&self, _header: &WidgetHeader, data: Box<dyn Any>) -> Result<Box<dyn Any>, GuiError> {
        let TextInputPayload { text, hint } = payload(data, Self::NAME)?;
        Ok(Box::new(TextInputState {
            text,
            hint,
            style: self.style,
            hovered: false,
            editing: false,
        }))
    }

    fn update(&self, cx: &mut UpdateContext<'_>, widget: &mut Widget, has_focus: bool) {
        let header = widget.header;
        let hovered = cx.mouse_over(&header.bounds);
        let Some(state) = widget.state_mut::<TextInputState>() else {
            return;
        };
        state.hovered = hovered;
        if has_focus {
            let clicked_away = cx.pressed(PointerButton::Primary) && !hovered;
            if clicked_away || cx.key_pressed(Key::Enter) || cx.key_pressed(Key::Escape) {
                cx.free_focus();
            } else {
                state.editing = true;
            }
        } else if hovered && cx.pressed(PointerButton::Primary) {
            cx.set_focus(&header, ACTION_EDIT);
            state.editing = true;
        }
    }

    fn draw(&self, cx: &mut DrawContext<'_>, widget: &Widget) {
        let Some(state) = widget.state::<TextInputState>() else {
            return;
        };
        let bounds = widget.bounds();
        cx.renderer
            .draw_filled_rect(bounds, state.style.fill(state.hovered, false));
        let padding = bounds.height * 0.2 / cx.aspect.max(f32::EPSILON);
        let text_bounds = Rect::new(
            bounds.x + padding,
            bounds.y,
            (bounds.width - 2.0 * padding).max(0.0),
            bounds.height,
        );
        if state.text.is_empty() {
            let mut hint_style = state.style;
            hint_style.text = hint_style.text.with_alpha(0.5);
            draw_text_line(cx, text_bounds, &state.hint, &hint_style, TextAlign::Left);
        } else {
            draw_text_line(cx, text_bounds, &state.text, &state.style, TextAlign::Left);
        }
        if cx.has_focus(widget.id()) {
            let line_height = bounds.height * state.style.text_scale;
            let advance = cx.text_width(&state.text, line_height).min(text_bounds.width);
            let caret = Rect::new(
                text_bounds.x + advance,
                bounds.y + (bounds.height - line_height) * 0.5,
                cx.pixel_size.width * 2.0,
                line_height,
            );
            cx.renderer.draw_filled_rect(caret, state.style.foreground);
        }
    }

    fn apply_property(&mut self, tag: PropertyTag, value: PropertyValue) -> Result<PropertyValue, GuiError> {
        self.style.apply(Self::NAME, tag, value)
    }

    fn describe(&self, widget: &Widget) -> String {
        widget
            .state::<TextInputState>()
            .map(|state| format!("{:?} editing={}", state.text, state.editing))
            .unwrap_or_default()
    }
}
