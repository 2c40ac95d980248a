//! Kind-global appearance shared by the default widgets.

use immui_core::{DrawContext, GuiError, PropertyTag, PropertyValue};
use immui_render_common::{TextAlign, TextTransform};
use immui_ui_graphics::{Color, Rect};

pub const BACKGROUND: PropertyTag = PropertyTag(1);
pub const HOVER: PropertyTag = PropertyTag(2);
pub const ACTIVE: PropertyTag = PropertyTag(3);
pub const FOREGROUND: PropertyTag = PropertyTag(4);
pub const TEXT_COLOR: PropertyTag = PropertyTag(5);
/// Line height as a fraction of the widget height.
pub const TEXT_SCALE: PropertyTag = PropertyTag(6);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WidgetStyle {
    pub background: Color,
    pub hover: Color,
    pub active: Color,
    pub foreground: Color,
    pub text: Color,
    pub text_scale: f32,
}

impl Default for WidgetStyle {
    fn default() -> Self {
        Self {
            background: Color::rgb(0.22, 0.24, 0.28),
            hover: Color::rgb(0.3, 0.33, 0.38),
            active: Color::rgb(0.18, 0.45, 0.75),
            foreground: Color::rgb(0.85, 0.87, 0.9),
            text: Color::WHITE,
            text_scale: 0.7,
        }
    }
}

impl WidgetStyle {
    pub fn transparent() -> Self {
        Self {
            background: Color::TRANSPARENT,
            hover: Color::TRANSPARENT,
            active: Color::TRANSPARENT,
            ..Self::default()
        }
    }

    /// Swaps one style property and returns the previous value.
    pub fn apply(&mut self, kind: &str, tag: PropertyTag, value: PropertyValue) -> Result<PropertyValue, GuiError> {
        let slot = match tag {
            BACKGROUND => &mut self.background,
            HOVER => &mut self.hover,
            ACTIVE => &mut self.active,
            FOREGROUND => &mut self.foreground,
            TEXT_COLOR => &mut self.text,
            TEXT_SCALE => {
                let old = std::mem::replace(&mut self.text_scale, value.as_float(tag)?);
                return Ok(PropertyValue::Float(old));
            }
            _ => {
                return Err(GuiError::UnknownProperty {
                    kind: kind.to_owned(),
                    tag,
                })
            }
        };
        Ok(PropertyValue::Color(std::mem::replace(slot, value.as_color(tag)?)))
    }

    /// Fill colour for an interactive widget.
    pub fn fill(&self, hovered: bool, active: bool) -> Color {
        if active {
            self.active
        } else if hovered {
            self.hover
        } else {
            self.background
        }
    }
}

/// Draws one line of text inside `bounds`.
pub fn draw_text_line(cx: &mut DrawContext<'_>, bounds: Rect, text: &str, style: &WidgetStyle, align: TextAlign) {
    if text.is_empty() {
        return;
    }
    let line_height = bounds.height * style.text_scale;
    let transform = TextTransform::new(bounds, line_height);
    let font = cx.font;
    cx.renderer
        .draw_text(text, transform, align, 1, font, &[style.text]);
}
