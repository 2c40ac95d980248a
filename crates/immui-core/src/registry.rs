//! Open tables of widget and layout kinds.
//!
//! Kinds are registered once at startup and addressed by small handles.
//! Handle 0 is reserved in both tables.

use std::any::Any;

use indexmap::IndexMap;
use immui_ui_graphics::Rect;

use crate::context::{DrawContext, LayoutContext, UpdateContext};
use crate::error::GuiError;
use crate::property::{PropertyStack, PropertyTag, PropertyValue};
use crate::tree::{Widget, WidgetHeader};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetKindId(pub(crate) u32);

impl WidgetKindId {
    pub const RESERVED: WidgetKindId = WidgetKindId(0);

    pub fn index(self) -> u32 {
        self.0
    }

    pub fn is_reserved(self) -> bool {
        self.0 == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutKindId(pub(crate) u32);

impl LayoutKindId {
    /// The "no layout" kind: every element gets a zero rectangle.
    pub const NONE: LayoutKindId = LayoutKindId(0);

    pub fn index(self) -> u32 {
        self.0
    }
}

/// Behaviour shared by every widget of one kind.
///
/// Kind-global properties (colours, text scale, ...) live on the
/// implementing value itself and are changed through
/// [`WidgetKind::apply_property`].
pub trait WidgetKind: 'static {
    fn name(&self) -> &str;

    /// Bytes one widget's payload costs in its parent's buffer.
    fn payload_size(&self) -> usize;

    /// Builds the widget's frame state from the payload recorded by the
    /// write call. Event fields must start cleared.
    fn read(&self, header: &WidgetHeader, payload: Box<dyn Any>) -> Result<Box<dyn Any>, GuiError>;

    fn update(&self, cx: &mut UpdateContext<'_>, widget: &mut Widget, has_focus: bool) {
        let _ = (cx, widget, has_focus);
    }

    fn draw(&self, cx: &mut DrawContext<'_>, widget: &Widget);

    /// Applies a kind-global property and returns the value it replaced.
    fn apply_property(
        &mut self,
        tag: PropertyTag,
        value: PropertyValue,
    ) -> Result<PropertyValue, GuiError> {
        let _ = value;
        Err(GuiError::UnknownProperty {
            kind: self.name().to_owned(),
            tag,
        })
    }

    /// One line of detail for the debug tree dump.
    fn describe(&self, widget: &Widget) -> String {
        let _ = widget;
        String::new()
    }
}

/// Bounds computation for the children of one parent.
///
/// A layout's data lives on the parent and is reset by [`LayoutKind::init`]
/// whenever the parent is replayed.
pub trait LayoutKind: 'static {
    fn name(&self) -> &str;

    fn init(&self) -> Box<dyn Any>;

    /// Bounds of the next element, as fractions of the parent's rectangle.
    fn compute_bounds(&self, data: &mut dyn Any, cx: &LayoutContext) -> Result<Rect, GuiError>;

    /// Applies a property to the parent's layout data and returns the value
    /// it replaced.
    fn apply_property(
        &self,
        data: &mut dyn Any,
        tag: PropertyTag,
        value: PropertyValue,
    ) -> Result<PropertyValue, GuiError>;
}

/// Downcasts layout data, reporting a mismatch against `kind`.
pub fn layout_data<'a, T: Any>(data: &'a mut dyn Any, kind: &str) -> Result<&'a mut T, GuiError> {
    data.downcast_mut::<T>()
        .ok_or_else(|| GuiError::LayoutDataMismatch {
            kind: kind.to_owned(),
        })
}

/// Downcasts a widget payload recorded by a write call.
pub fn payload<T: Any>(payload: Box<dyn Any>, kind: &str) -> Result<T, GuiError> {
    payload
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| GuiError::PayloadTypeMismatch {
            kind: kind.to_owned(),
            expected: std::any::type_name::<T>(),
        })
}

struct ReservedWidget;

impl WidgetKind for ReservedWidget {
    fn name(&self) -> &str {
        "<reserved>"
    }

    fn payload_size(&self) -> usize {
        0
    }

    fn read(&self, _header: &WidgetHeader, _payload: Box<dyn Any>) -> Result<Box<dyn Any>, GuiError> {
        Err(GuiError::UnknownWidgetKind {
            kind: WidgetKindId::RESERVED,
        })
    }

    fn draw(&self, _cx: &mut DrawContext<'_>, _widget: &Widget) {}
}

struct NoLayout;

impl LayoutKind for NoLayout {
    fn name(&self) -> &str {
        "none"
    }

    fn init(&self) -> Box<dyn Any> {
        Box::new(())
    }

    fn compute_bounds(&self, _data: &mut dyn Any, _cx: &LayoutContext) -> Result<Rect, GuiError> {
        Ok(Rect::ZERO)
    }

    fn apply_property(
        &self,
        _data: &mut dyn Any,
        tag: PropertyTag,
        _value: PropertyValue,
    ) -> Result<PropertyValue, GuiError> {
        Err(GuiError::UnknownProperty {
            kind: self.name().to_owned(),
            tag,
        })
    }
}

pub(crate) struct WidgetKindEntry {
    pub(crate) kind: Box<dyn WidgetKind>,
    /// Kind-global push/pop scope, shared by every widget of the kind.
    pub(crate) properties: PropertyStack,
}

impl WidgetKindEntry {
    /// Pushes a kind-global property.
    pub(crate) fn push(&mut self, tag: PropertyTag, value: PropertyValue) -> Result<(), GuiError> {
        let WidgetKindEntry { kind, properties } = self;
        properties.push_with(tag, value, |tag, value| kind.apply_property(tag, value))
    }

    pub(crate) fn pop(&mut self, count: usize) -> Result<(), GuiError> {
        let WidgetKindEntry { kind, properties } = self;
        properties.pop_with(count, |tag, value| kind.apply_property(tag, value))
    }
}

pub struct Registry {
    widgets: IndexMap<String, WidgetKindEntry>,
    layouts: IndexMap<String, Box<dyn LayoutKind>>,
    property_stack_capacity: usize,
}

impl Registry {
    pub fn new(property_stack_capacity: usize) -> Self {
        let mut registry = Self {
            widgets: IndexMap::new(),
            layouts: IndexMap::new(),
            property_stack_capacity,
        };
        registry.insert_widget(Box::new(ReservedWidget));
        registry.layouts.insert("none".to_owned(), Box::new(NoLayout));
        registry
    }

    fn insert_widget(&mut self, kind: Box<dyn WidgetKind>) -> WidgetKindId {
        let entry = WidgetKindEntry {
            kind,
            properties: PropertyStack::new(self.property_stack_capacity),
        };
        let name = entry.kind.name().to_owned();
        let (index, _) = self.widgets.insert_full(name, entry);
        WidgetKindId(index as u32)
    }

    /// Registering a name twice keeps the first kind and returns its handle.
    pub fn register_widget_kind(&mut self, kind: Box<dyn WidgetKind>) -> WidgetKindId {
        if let Some(index) = self.widgets.get_index_of(kind.name()) {
            log::warn!("widget kind `{}` is already registered", kind.name());
            return WidgetKindId(index as u32);
        }
        let id = self.insert_widget(kind);
        log::debug!("registered widget kind {} as {}", self.widgets[id.0 as usize].kind.name(), id.0);
        id
    }

    pub fn register_layout_kind(&mut self, kind: Box<dyn LayoutKind>) -> LayoutKindId {
        if let Some(index) = self.layouts.get_index_of(kind.name()) {
            log::warn!("layout kind `{}` is already registered", kind.name());
            return LayoutKindId(index as u32);
        }
        let (index, _) = self.layouts.insert_full(kind.name().to_owned(), kind);
        log::debug!("registered layout kind {} as {index}", self.layouts[index].name());
        LayoutKindId(index as u32)
    }

    pub fn widget_kind_by_name(&self, name: &str) -> Option<WidgetKindId> {
        self.widgets
            .get_index_of(name)
            .filter(|index| *index != 0)
            .map(|index| WidgetKindId(index as u32))
    }

    pub fn layout_kind_by_name(&self, name: &str) -> Option<LayoutKindId> {
        self.layouts
            .get_index_of(name)
            .map(|index| LayoutKindId(index as u32))
    }

    pub fn widget_kind_count(&self) -> usize {
        self.widgets.len()
    }

    pub fn layout_kind_count(&self) -> usize {
        self.layouts.len()
    }

    /// Kind behind `id`; the reserved handle resolves to nothing.
    pub fn widget_kind(&self, id: WidgetKindId) -> Option<&dyn WidgetKind> {
        self.widget_entry(id).map(|entry| entry.kind.as_ref())
    }

    pub(crate) fn widget_entry(&self, id: WidgetKindId) -> Option<&WidgetKindEntry> {
        if id.is_reserved() {
            return None;
        }
        self.widgets.get_index(id.0 as usize).map(|(_, entry)| entry)
    }

    pub(crate) fn widget_entry_mut(&mut self, id: WidgetKindId) -> Option<&mut WidgetKindEntry> {
        if id.is_reserved() {
            return None;
        }
        self.widgets
            .get_index_mut(id.0 as usize)
            .map(|(_, entry)| entry)
    }

    pub fn layout_kind(&self, id: LayoutKindId) -> Option<&dyn LayoutKind> {
        self.layouts
            .get_index(id.0 as usize)
            .map(|(_, kind)| kind.as_ref())
    }

    pub(crate) fn widget_entries_mut(&mut self) -> impl Iterator<Item = (WidgetKindId, &mut WidgetKindEntry)> {
        self.widgets
            .values_mut()
            .enumerate()
            .skip(1)
            .map(|(index, entry)| (WidgetKindId(index as u32), entry))
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
