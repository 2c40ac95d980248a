//! Retained-state reconciliation engine for the immui immediate-mode GUI.
//!
//! Applications declare their interface every frame through [`Gui`]'s write
//! API. The declarations are recorded into a command buffer and replayed by
//! [`Gui::end`], which rebuilds the parent/widget tree, reattaches state that
//! survives between frames (scroll offsets, focus) by id, lays everything out
//! and routes input to the widgets. [`Gui::draw`] walks the result.

pub mod collections;
pub mod command;
pub mod config;
pub mod context;
pub mod debug;
mod draw;
pub mod error;
pub mod focus;
mod gui;
pub mod hash;
pub mod id;
pub mod platform;
pub mod property;
mod reconcile;
pub mod registry;
pub mod scroll;
pub mod state;
pub mod tree;

pub use command::{Command, CommandBuffer, CommandTag, WidgetRecord};
pub use config::GuiConfig;
pub use context::{DrawContext, LayoutContext, UpdateContext};
pub use error::GuiError;
pub use focus::{FocusRecord, FocusRouter};
pub use gui::{Gui, Phase};
pub use id::{id_from_str, location_id, Id, IdStack, ID_STACK_SEED, ROOT_ID};
pub use platform::Clock;
pub use property::{PropertyStack, PropertyTag, PropertyValue};
pub use registry::{
    layout_data, payload, LayoutKind, LayoutKindId, Registry, WidgetKind, WidgetKindId,
};
pub use scroll::{step_scroll, ScrollTuning};
pub use state::{PersistentState, PersistentStore, StateHandle};
pub use tree::{
    Background, Layout, Parent, ParentArena, ParentFlags, ParentIndex, Widget, WidgetFlags,
    WidgetHeader, WIDGET_HEADER_SIZE,
};

pub mod prelude {
    pub use crate::gui_id;
    pub use crate::{
        Background, Gui, GuiConfig, Id, LayoutKindId, ParentFlags, PropertyTag, PropertyValue,
        WidgetFlags, WidgetKindId,
    };
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod reconcile_tests;
