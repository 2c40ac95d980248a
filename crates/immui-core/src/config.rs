use crate::scroll::ScrollTuning;

/// Capacities and tuning for a [`Gui`](crate::Gui) instance.
#[derive(Debug, Clone, PartialEq)]
pub struct GuiConfig {
    /// Parents that can be declared in one frame, the root excluded.
    pub max_parents: usize,
    /// Bytes of widget headers and payloads a single parent can hold.
    pub widget_buffer_capacity: usize,
    /// Entries a layout or widget-kind property stack can hold.
    pub property_stack_capacity: usize,
    pub scroll: ScrollTuning,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            max_parents: 1000,
            widget_buffer_capacity: 16 * 1024,
            property_stack_capacity: 64,
            scroll: ScrollTuning::default(),
        }
    }
}

impl GuiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_parents(mut self, max_parents: usize) -> Self {
        self.max_parents = max_parents;
        self
    }

    pub fn with_widget_buffer_capacity(mut self, bytes: usize) -> Self {
        self.widget_buffer_capacity = bytes;
        self
    }

    pub fn with_property_stack_capacity(mut self, entries: usize) -> Self {
        self.property_stack_capacity = entries;
        self
    }

    pub fn with_scroll(mut self, scroll: ScrollTuning) -> Self {
        self.scroll = scroll;
        self
    }
}
