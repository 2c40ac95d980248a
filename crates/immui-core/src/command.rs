//! The per-frame command log written by the declarative API and replayed
//! once by the reconciler.

use std::any::Any;
use std::fmt;

use crate::id::Id;
use crate::property::{PropertyTag, PropertyValue};
use crate::registry::{LayoutKindId, WidgetKindId};
use crate::tree::{Background, ParentFlags, WidgetFlags};

pub struct WidgetRecord {
    pub id: Id,
    pub flags: WidgetFlags,
    pub kind: WidgetKindId,
    pub payload: Box<dyn Any>,
}

impl fmt::Debug for WidgetRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetRecord")
            .field("id", &self.id)
            .field("flags", &self.flags)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum Command {
    Widget(WidgetRecord),
    BeginParent {
        id: Id,
        name: String,
        flags: ParentFlags,
        layout: LayoutKindId,
    },
    EndParent,
    SetBackground(Background),
    LayoutPush {
        tag: PropertyTag,
        value: PropertyValue,
    },
    LayoutSet {
        tag: PropertyTag,
        value: PropertyValue,
    },
    LayoutPop {
        count: usize,
    },
    WidgetPush {
        kind: WidgetKindId,
        tag: PropertyTag,
        value: PropertyValue,
    },
    WidgetSet {
        kind: WidgetKindId,
        tag: PropertyTag,
        value: PropertyValue,
    },
    WidgetPop {
        kind: WidgetKindId,
        count: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandTag {
    Widget,
    BeginParent,
    EndParent,
    SetBackground,
    LayoutPush,
    LayoutSet,
    LayoutPop,
    WidgetPush,
    WidgetSet,
    WidgetPop,
}

impl Command {
    pub fn tag(&self) -> CommandTag {
        match self {
            Command::Widget(_) => CommandTag::Widget,
            Command::BeginParent { .. } => CommandTag::BeginParent,
            Command::EndParent => CommandTag::EndParent,
            Command::SetBackground(_) => CommandTag::SetBackground,
            Command::LayoutPush { .. } => CommandTag::LayoutPush,
            Command::LayoutSet { .. } => CommandTag::LayoutSet,
            Command::LayoutPop { .. } => CommandTag::LayoutPop,
            Command::WidgetPush { .. } => CommandTag::WidgetPush,
            Command::WidgetSet { .. } => CommandTag::WidgetSet,
            Command::WidgetPop { .. } => CommandTag::WidgetPop,
        }
    }
}

/// Append-only until [`CommandBuffer::clear`]; drained in order.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<Command>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn tags(&self) -> impl Iterator<Item = CommandTag> + '_ {
        self.commands.iter().map(Command::tag)
    }

    pub(crate) fn take(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }
}
