use std::fmt;

use crate::id::Id;
use crate::property::PropertyTag;
use crate::registry::WidgetKindId;

/// Failures detected while recording or replaying a frame.
///
/// Capacity and reference errors are logged and the offending element is
/// dropped. Fatal errors mean the command buffer no longer matches the
/// protocol the reconciler expects.
#[derive(Debug, Clone, PartialEq)]
pub enum GuiError {
    ParentArenaFull {
        capacity: usize,
    },
    WidgetBufferFull {
        parent: Id,
        widget: Id,
        capacity: usize,
    },
    PropertyStackFull {
        capacity: usize,
    },
    PropertyStackUnderflow,
    UnknownWidgetKind {
        kind: WidgetKindId,
    },
    UnknownLayoutKind {
        name: String,
    },
    UnknownProperty {
        kind: String,
        tag: PropertyTag,
    },
    PropertyTypeMismatch {
        tag: PropertyTag,
        expected: &'static str,
        found: &'static str,
    },
    PayloadTypeMismatch {
        kind: String,
        expected: &'static str,
    },
    LayoutDataMismatch {
        kind: String,
    },
    UnbalancedParent,
    UnbalancedLayoutStack {
        parent: Id,
        remaining: usize,
    },
}

impl GuiError {
    /// Corrupted-buffer conditions. The reconciler treats these as assertion
    /// failures.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GuiError::PropertyStackUnderflow
                | GuiError::PayloadTypeMismatch { .. }
                | GuiError::LayoutDataMismatch { .. }
                | GuiError::UnbalancedParent
                | GuiError::UnbalancedLayoutStack { .. }
        )
    }

    pub fn is_capacity(&self) -> bool {
        matches!(
            self,
            GuiError::ParentArenaFull { .. }
                | GuiError::WidgetBufferFull { .. }
                | GuiError::PropertyStackFull { .. }
        )
    }
}

impl fmt::Display for GuiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuiError::ParentArenaFull { capacity } => {
                write!(f, "parent arena full ({capacity} parents)")
            }
            GuiError::WidgetBufferFull {
                parent,
                widget,
                capacity,
            } => write!(
                f,
                "widget buffer of parent {parent:#x} full ({capacity} bytes), dropping widget {widget:#x}"
            ),
            GuiError::PropertyStackFull { capacity } => {
                write!(f, "property stack full ({capacity} entries)")
            }
            GuiError::PropertyStackUnderflow => write!(f, "property stack underflow"),
            GuiError::UnknownWidgetKind { kind } => {
                write!(f, "unknown widget kind {}", kind.index())
            }
            GuiError::UnknownLayoutKind { name } => write!(f, "unknown layout kind `{name}`"),
            GuiError::UnknownProperty { kind, tag } => {
                write!(f, "`{kind}` has no property {}", tag.0)
            }
            GuiError::PropertyTypeMismatch {
                tag,
                expected,
                found,
            } => write!(
                f,
                "property {} expects a {expected} value, got {found}",
                tag.0
            ),
            GuiError::PayloadTypeMismatch { kind, expected } => {
                write!(f, "`{kind}` payload is not a {expected}")
            }
            GuiError::LayoutDataMismatch { kind } => {
                write!(f, "layout data does not belong to `{kind}`")
            }
            GuiError::UnbalancedParent => write!(f, "end_parent without a matching begin_parent"),
            GuiError::UnbalancedLayoutStack { parent, remaining } => write!(
                f,
                "parent {parent:#x} closed with {remaining} layout properties still pushed"
            ),
        }
    }
}

impl std::error::Error for GuiError {}
