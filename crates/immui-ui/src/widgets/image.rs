use std::any::Any;

use immui_core::{payload, DrawContext, GuiError, Widget, WidgetHeader, WidgetKind};
use immui_ui_graphics::{Color, ImageId, Rect};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImagePayload {
    pub image: ImageId,
    pub texcoords: Rect,
    pub tint: Color,
}

/// Textured quad.
#[derive(Default)]
pub struct ImageKind;

impl ImageKind {
    pub const NAME: &'static str = "image";
}

impl WidgetKind for ImageKind {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn payload_size(&self) -> usize {
        std::mem::size_of::<ImagePayload>()
    }

    fn read(&self, _header: &WidgetHeader, data: Box<dyn Any>) -> Result<Box<dyn Any>, GuiError> {
        let image: ImagePayload = payload(data, Self::NAME)?;
        Ok(Box::new(image))
    }

    fn draw(&self, cx: &mut DrawContext<'_>, widget: &Widget) {
        if let Some(image) = widget.state::<ImagePayload>() {
            cx.renderer
                .draw_textured_rect(widget.bounds(), image.tint, image.image, image.texcoords);
        }
    }

    fn describe(&self, widget: &Widget) -> String {
        widget
            .state::<ImagePayload>()
            .map(|image| format!("image #{}", image.image.0))
            .unwrap_or_default()
    }
}
