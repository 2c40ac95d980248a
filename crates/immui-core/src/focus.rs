//! Single global focus record.

use crate::id::Id;
use crate::registry::WidgetKindId;
use crate::tree::{ParentArena, ParentIndex, WidgetHeader};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusRecord {
    pub kind: WidgetKindId,
    pub widget: Id,
    pub parent: Id,
    /// Kind-defined meaning, e.g. which part of a widget is being dragged.
    pub action: u32,
}

/// Holds at most one focused widget.
///
/// The cached slot points into the current frame's arena and is rebuilt from
/// ids after every reconciliation.
#[derive(Debug, Default)]
pub struct FocusRouter {
    record: Option<FocusRecord>,
    slot: Option<(ParentIndex, usize)>,
}

impl FocusRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any existing focus.
    pub fn set(&mut self, widget: &WidgetHeader, parent: Id, action: u32) {
        self.set_record(FocusRecord {
            kind: widget.kind,
            widget: widget.id,
            parent,
            action,
        });
    }

    pub fn set_record(&mut self, record: FocusRecord) {
        if let Some(previous) = self.record {
            if previous.widget != record.widget {
                log::trace!(
                    "focus moves from {:#x} to {:#x}",
                    previous.widget,
                    record.widget
                );
            }
        }
        self.record = Some(record);
        self.slot = None;
    }

    pub fn free(&mut self) {
        self.record = None;
        self.slot = None;
    }

    pub fn has_focus(&self) -> bool {
        self.record.is_some()
    }

    pub fn is_focused(&self, widget: Id) -> bool {
        self.record.is_some_and(|record| record.widget == widget)
    }

    pub fn record(&self) -> Option<FocusRecord> {
        self.record
    }

    pub fn action(&self) -> Option<u32> {
        self.record.map(|record| record.action)
    }

    pub fn slot(&self) -> Option<(ParentIndex, usize)> {
        self.slot
    }

    /// Re-resolves the record against a freshly reconciled tree. Focus is
    /// cleared when the parent, the widget, or its kind no longer match.
    pub fn resolve(&mut self, tree: &ParentArena) -> Option<(ParentIndex, usize)> {
        self.slot = None;
        let record = self.record?;
        let resolved = tree.find(record.parent).and_then(|index| {
            tree[index]
                .find_widget_slot(record.widget)
                .map(|slot| (index, slot))
        });
        match resolved {
            Some((index, slot)) if tree[index].widgets[slot].header.kind == record.kind => {
                self.slot = Some((index, slot));
                self.slot
            }
            Some(_) => {
                log::warn!(
                    "focused widget {:#x} changed kind, clearing focus",
                    record.widget
                );
                self.record = None;
                None
            }
            None => {
                log::warn!(
                    "focused widget {:#x} in parent {:#x} no longer exists, clearing focus",
                    record.widget,
                    record.parent
                );
                self.record = None;
                None
            }
        }
    }
}
