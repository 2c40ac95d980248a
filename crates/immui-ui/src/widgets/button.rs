use std::any::Any;

use immui_core::{
    payload, DrawContext, GuiError, PropertyTag, PropertyValue, UpdateContext, Widget, WidgetHeader, WidgetKind,
};
use immui_render_common::TextAlign;

use super::press_release;
use crate::style::{draw_text_line, WidgetStyle};

#[derive(Clone, Debug, PartialEq)]
pub struct ButtonPayload {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ButtonState {
    pub text: String,
    pub style: WidgetStyle,
    pub hovered: bool,
    pub held: bool,
    /// Set by the frame in which a press was released inside the button.
    pub pressed: bool,
}

/// Push button.
#[derive(Default)]
pub struct ButtonKind {
    pub style: WidgetStyle,
}

impl ButtonKind {
    pub const NAME: &'static str = "button";
}

impl WidgetKind for ButtonKind {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn payload_size(&self) -> usize {
        std::mem::size_of::<ButtonPayload>()
    }

    fn read(&self, _header: &WidgetHeader, data: Box<dyn Any>) -> Result<Box<dyn Any>, GuiError> {
        let ButtonPayload { text } = payload(data, Self::NAME)?;
        Ok(Box::new(ButtonState {
            text,
            style: self.style,
            hovered: false,
            held: false,
            pressed: false,
        }))
    }

    fn update(&self, cx: &mut UpdateContext<'_>, widget: &mut Widget, has_focus: bool) {
        let header = widget.header;
        let Some(state) = widget.state_mut::<ButtonState>() else {
            return;
        };
        let press = press_release(cx, &header, has_focus);
        state.hovered = press.hovered;
        state.held = press.held;
        state.pressed = press.fired;
    }

    fn draw(&self, cx: &mut DrawContext<'_>, widget: &Widget) {
        let Some(state) = widget.state::<ButtonState>() else {
            return;
        };
        let fill = state.style.fill(state.hovered, state.held);
        cx.renderer.draw_filled_rect(widget.bounds(), fill);
        draw_text_line(cx, widget.bounds(), &state.text, &state.style, TextAlign::Center);
    }

    fn apply_property(&mut self, tag: PropertyTag, value: PropertyValue) -> Result<PropertyValue, GuiError> {
        self.style.apply(Self::NAME, tag, value)
    }

    fn describe(&self, widget: &Widget) -> String {
        widget
            .state::<ButtonState>()
            .map(|state| format!("{:?} pressed={}", state.text, state.pressed))
            .unwrap_or_default()
    }
}
