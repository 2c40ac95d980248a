use std::any::Any;

use immui_core::{payload, DrawContext, GuiError, PropertyTag, PropertyValue, Widget, WidgetHeader, WidgetKind};
use immui_ui_graphics::Color;

use crate::style::WidgetStyle;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelPayload {
    /// Overrides the kind's background colour.
    pub color: Option<Color>,
}

/// Flat coloured rectangle, used for separators and backdrops.
#[derive(Default)]
pub struct PanelKind {
    pub style: WidgetStyle,
}

impl PanelKind {
    pub const NAME: &'static str = "panel";
}

impl WidgetKind for PanelKind {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn payload_size(&self) -> usize {
        std::mem::size_of::<PanelPayload>()
    }

    fn read(&self, _header: &WidgetHeader, data: Box<dyn Any>) -> Result<Box<dyn Any>, GuiError> {
        let PanelPayload { color } = payload(data, Self::NAME)?;
        Ok(Box::new(color.unwrap_or(self.style.background)))
    }

    fn draw(&self, cx: &mut DrawContext<'_>, widget: &Widget) {
        if let Some(color) = widget.state::<Color>() {
            cx.renderer.draw_filled_rect(widget.bounds(), *color);
        }
    }

    fn apply_property(&mut self, tag: PropertyTag, value: PropertyValue) -> Result<PropertyValue, GuiError> {
        self.style.apply(Self::NAME, tag, value)
    }
}
