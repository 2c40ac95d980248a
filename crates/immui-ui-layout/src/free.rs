//! Layout where every element positions itself.

use std::any::Any;

use immui_core::{layout_data, Gui, GuiError, LayoutContext, LayoutKind, PropertyTag, PropertyValue};
use immui_ui_graphics::{Coordinate, Dimension, Rect};

/// Placement applied to every element declared while it is in effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FreeLayoutConfig {
    pub x: Coordinate,
    pub y: Coordinate,
    pub width: Dimension,
    pub height: Dimension,
}

impl Default for FreeLayoutConfig {
    /// Fills the parent.
    fn default() -> Self {
        Self {
            x: Coordinate::relative(0.0),
            y: Coordinate::relative(0.0),
            width: Dimension::relative(1.0),
            height: Dimension::relative(1.0),
        }
    }
}

impl FreeLayoutConfig {
    /// Resolves the element rectangle as fractions of the parent.
    ///
    /// The size is resolved first because aligned coordinates are offset by
    /// the element's own extent.
    pub fn resolve(&self, cx: &LayoutContext) -> Rect {
        let parent = cx.parent_bounds;
        let pixel = cx.pixel_size;
        let width = self
            .width
            .unit
            .to_fraction(self.width.value, parent.width, pixel.width);
        let height = self
            .height
            .unit
            .to_fraction(self.height.value, parent.height, pixel.height);
        let x = self
            .x
            .unit
            .to_fraction(self.x.value, parent.width, pixel.width);
        let y = self
            .y
            .unit
            .to_fraction(self.y.value, parent.height, pixel.height);
        Rect::new(
            self.x.alignment.place(x, width),
            self.y.alignment.place(y, height),
            width,
            height,
        )
    }
}

/// The `free` layout kind.
pub struct FreeLayout;

impl FreeLayout {
    pub const NAME: &'static str = "free";
    pub const X: PropertyTag = PropertyTag(1);
    pub const Y: PropertyTag = PropertyTag(2);
    pub const WIDTH: PropertyTag = PropertyTag(3);
    pub const HEIGHT: PropertyTag = PropertyTag(4);

    /// Sets all four descriptors of the current parent's free layout.
    pub fn set(gui: &mut Gui, x: Coordinate, y: Coordinate, width: Dimension, height: Dimension) {
        gui.layout_set(Self::X, x);
        gui.layout_set(Self::Y, y);
        gui.layout_set(Self::WIDTH, width);
        gui.layout_set(Self::HEIGHT, height);
    }

    /// Pushes all four descriptors; undo with `gui.layout_pop(4)`.
    pub fn push(gui: &mut Gui, x: Coordinate, y: Coordinate, width: Dimension, height: Dimension) {
        gui.layout_push(Self::X, x);
        gui.layout_push(Self::Y, y);
        gui.layout_push(Self::WIDTH, width);
        gui.layout_push(Self::HEIGHT, height);
    }
}

impl LayoutKind for FreeLayout {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn init(&self) -> Box<dyn Any> {
        Box::new(FreeLayoutConfig::default())
    }

    fn compute_bounds(&self, data: &mut dyn Any, cx: &LayoutContext) -> Result<Rect, GuiError> {
        let config = layout_data::<FreeLayoutConfig>(data, Self::NAME)?;
        Ok(config.resolve(cx))
    }

    fn apply_property(
        &self,
        data: &mut dyn Any,
        tag: PropertyTag,
        value: PropertyValue,
    ) -> Result<PropertyValue, GuiError> {
        let config = layout_data::<FreeLayoutConfig>(data, Self::NAME)?;
        let old = match tag {
            Self::X => PropertyValue::Coordinate(std::mem::replace(&mut config.x, value.as_coordinate(tag)?)),
            Self::Y => PropertyValue::Coordinate(std::mem::replace(&mut config.y, value.as_coordinate(tag)?)),
            Self::WIDTH => PropertyValue::Dimension(std::mem::replace(&mut config.width, value.as_dimension(tag)?)),
            Self::HEIGHT => PropertyValue::Dimension(std::mem::replace(&mut config.height, value.as_dimension(tag)?)),
            _ => {
                return Err(GuiError::UnknownProperty {
                    kind: Self::NAME.to_owned(),
                    tag,
                })
            }
        };
        Ok(old)
    }
}

#[cfg(test)]
#[path = "tests/free_tests.rs"]
mod tests;
