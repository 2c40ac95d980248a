use std::any::Any;

use immui_core::{payload, DrawContext, GuiError, PropertyTag, PropertyValue, Widget, WidgetHeader, WidgetKind};
use immui_render_common::TextAlign;

use crate::style::{draw_text_line, WidgetStyle};

#[derive(Clone, Debug, PartialEq)]
pub struct LabelPayload {
    pub text: String,
    pub align: TextAlign,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelState {
    pub text: String,
    pub align: TextAlign,
    pub style: WidgetStyle,
}

/// Static text.
pub struct LabelKind {
    pub style: WidgetStyle,
}

impl Default for LabelKind {
    fn default() -> Self {
        Self {
            style: WidgetStyle::transparent(),
        }
    }
}

impl LabelKind {
    pub const NAME: &'static str = "label";
}

impl WidgetKind for LabelKind {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn payload_size(&self) -> usize {
        std::mem::size_of::<LabelPayload>()
    }

    fn read(&self, _header: &WidgetHeader, data: Box<dyn Any>) -> Result<Box<dyn Any>, GuiError> {
        let LabelPayload { text, align } = payload(data, Self::NAME)?;
        Ok(Box::new(LabelState {
            text,
            align,
            style: self.style,
        }))
    }

    fn draw(&self, cx: &mut DrawContext<'_>, widget: &Widget) {
        let Some(state) = widget.state::<LabelState>() else {
            return;
        };
        if state.style.background.a() > 0.0 {
            cx.renderer
                .draw_filled_rect(widget.bounds(), state.style.background);
        }
        draw_text_line(cx, widget.bounds(), &state.text, &state.style, state.align);
    }

    fn apply_property(&mut self, tag: PropertyTag, value: PropertyValue) -> Result<PropertyValue, GuiError> {
        self.style.apply(Self::NAME, tag, value)
    }

    fn describe(&self, widget: &Widget) -> String {
        widget
            .state::<LabelState>()
            .map(|state| format!("{:?}", state.text))
            .unwrap_or_default()
    }
}
