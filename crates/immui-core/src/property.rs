//! Typed property values and the LIFO stacks that scope them.

use immui_ui_graphics::{Color, Coordinate, Dimension, FontId, ImageId, Rect};

use crate::error::GuiError;

/// Property identifier. The set of tags is defined by each layout or widget
/// kind; tags only need to be unique within one kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyTag(pub u32);

#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Float(f32),
    Color(Color),
    Rect(Rect),
    Coordinate(Coordinate),
    Dimension(Dimension),
    Font(FontId),
    Image(ImageId),
    Text(String),
}

macro_rules! accessor {
    ($name:ident, $variant:ident, $ty:ty, $label:literal) => {
        pub fn $name(&self, tag: PropertyTag) -> Result<$ty, GuiError> {
            match self {
                PropertyValue::$variant(value) => Ok(value.clone()),
                other => Err(GuiError::PropertyTypeMismatch {
                    tag,
                    expected: $label,
                    found: other.type_name(),
                }),
            }
        }
    };
}

impl PropertyValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Int(_) => "int",
            PropertyValue::Float(_) => "float",
            PropertyValue::Color(_) => "color",
            PropertyValue::Rect(_) => "rect",
            PropertyValue::Coordinate(_) => "coordinate",
            PropertyValue::Dimension(_) => "dimension",
            PropertyValue::Font(_) => "font",
            PropertyValue::Image(_) => "image",
            PropertyValue::Text(_) => "text",
        }
    }

    accessor!(as_bool, Bool, bool, "bool");
    accessor!(as_int, Int, i64, "int");
    accessor!(as_float, Float, f32, "float");
    accessor!(as_color, Color, Color, "color");
    accessor!(as_rect, Rect, Rect, "rect");
    accessor!(as_coordinate, Coordinate, Coordinate, "coordinate");
    accessor!(as_dimension, Dimension, Dimension, "dimension");
    accessor!(as_font, Font, FontId, "font");
    accessor!(as_image, Image, ImageId, "image");
    accessor!(as_text, Text, String, "text");
}

macro_rules! from_value {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for PropertyValue {
            fn from(value: $ty) -> Self {
                PropertyValue::$variant(value)
            }
        }
    };
}

from_value!(bool, Bool);
from_value!(i64, Int);
from_value!(f32, Float);
from_value!(Color, Color);
from_value!(Rect, Rect);
from_value!(Coordinate, Coordinate);
from_value!(Dimension, Dimension);
from_value!(FontId, Font);
from_value!(ImageId, Image);
from_value!(String, Text);

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_owned())
    }
}

/// Value captured by a push, restored by the matching pop.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyEntry {
    pub tag: PropertyTag,
    pub old: PropertyValue,
}

#[derive(Clone, Debug, PartialEq)]
enum Slot {
    Applied(PropertyEntry),
    /// A push that could not be applied. Keeps push and pop counts aligned.
    Dropped,
}

/// LIFO of captured property values.
///
/// Only applied entries count against the capacity.
#[derive(Clone, Debug)]
pub struct PropertyStack {
    slots: Vec<Slot>,
    applied: usize,
    capacity: usize,
}

impl PropertyStack {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            applied: 0,
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.applied >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.applied = 0;
    }

    /// Applies `value` through `apply` and records the value it replaced.
    ///
    /// A failed push still occupies a slot so that the caller's pop count
    /// stays valid; the error is returned for reporting.
    pub fn push_with<F>(
        &mut self,
        tag: PropertyTag,
        value: PropertyValue,
        apply: F,
    ) -> Result<(), GuiError>
    where
        F: FnOnce(PropertyTag, PropertyValue) -> Result<PropertyValue, GuiError>,
    {
        if self.is_full() {
            self.slots.push(Slot::Dropped);
            return Err(GuiError::PropertyStackFull {
                capacity: self.capacity,
            });
        }
        match apply(tag, value) {
            Ok(old) => {
                self.slots.push(Slot::Applied(PropertyEntry { tag, old }));
                self.applied += 1;
                Ok(())
            }
            Err(err) => {
                self.slots.push(Slot::Dropped);
                Err(err)
            }
        }
    }

    /// Unwinds `count` entries in reverse order, re-applying each captured
    /// value. Popping past the bottom is a protocol violation.
    pub fn pop_with<F>(&mut self, count: usize, mut apply: F) -> Result<(), GuiError>
    where
        F: FnMut(PropertyTag, PropertyValue) -> Result<PropertyValue, GuiError>,
    {
        for _ in 0..count {
            match self.slots.pop() {
                None => return Err(GuiError::PropertyStackUnderflow),
                Some(Slot::Dropped) => {}
                Some(Slot::Applied(entry)) => {
                    self.applied -= 1;
                    apply(entry.tag, entry.old)?;
                }
            }
        }
        Ok(())
    }

    /// Applied entries from the bottom of the stack.
    pub fn entries(&self) -> impl Iterator<Item = &PropertyEntry> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Applied(entry) => Some(entry),
            Slot::Dropped => None,
        })
    }
}

#[cfg(test)]
#[path = "tests/property_tests.rs"]
mod tests;
