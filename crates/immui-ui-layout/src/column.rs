//! Vertical list layout.

use std::any::Any;

use immui_core::{layout_data, GuiError, LayoutContext, LayoutKind, PropertyTag, PropertyValue};
use immui_ui_graphics::{Dimension, Rect};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnConfig {
    pub item_height: Dimension,
    /// Gap between consecutive items.
    pub spacing: Dimension,
    /// Horizontal margin on both sides.
    pub inset: Dimension,
    /// Top of the next item, as a parent fraction.
    pub cursor: f32,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            item_height: Dimension::absolute(0.05),
            spacing: Dimension::pixels(4.0),
            inset: Dimension::pixels(4.0),
            cursor: 0.0,
        }
    }
}

/// The `column` layout kind: items stacked top to bottom.
pub struct ColumnLayout;

impl ColumnLayout {
    pub const NAME: &'static str = "column";
    pub const ITEM_HEIGHT: PropertyTag = PropertyTag(1);
    pub const SPACING: PropertyTag = PropertyTag(2);
    pub const INSET: PropertyTag = PropertyTag(3);
}

impl LayoutKind for ColumnLayout {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn init(&self) -> Box<dyn Any> {
        Box::new(ColumnConfig::default())
    }

    fn compute_bounds(&self, data: &mut dyn Any, cx: &LayoutContext) -> Result<Rect, GuiError> {
        let config = layout_data::<ColumnConfig>(data, Self::NAME)?;
        let parent = cx.parent_bounds;
        let pixel = cx.pixel_size;
        let height = config
            .item_height
            .unit
            .to_fraction(config.item_height.value, parent.height, pixel.height);
        let spacing = config
            .spacing
            .unit
            .to_fraction(config.spacing.value, parent.height, pixel.height);
        let inset = config
            .inset
            .unit
            .to_fraction(config.inset.value, parent.width, pixel.width)
            .min(0.5);
        let bounds = Rect::new(inset, config.cursor, 1.0 - 2.0 * inset, height);
        config.cursor += height + spacing;
        Ok(bounds)
    }

    fn apply_property(
        &self,
        data: &mut dyn Any,
        tag: PropertyTag,
        value: PropertyValue,
    ) -> Result<PropertyValue, GuiError> {
        let config = layout_data::<ColumnConfig>(data, Self::NAME)?;
        let slot = match tag {
            Self::ITEM_HEIGHT => &mut config.item_height,
            Self::SPACING => &mut config.spacing,
            Self::INSET => &mut config.inset,
            _ => {
                return Err(GuiError::UnknownProperty {
                    kind: Self::NAME.to_owned(),
                    tag,
                })
            }
        };
        let old = std::mem::replace(slot, value.as_dimension(tag)?);
        Ok(PropertyValue::Dimension(old))
    }
}

#[cfg(test)]
#[path = "tests/column_tests.rs"]
mod tests;
