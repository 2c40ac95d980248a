//! Built-in layout kinds for immui

mod column;
mod free;

pub use column::*;
pub use free::*;

use immui_core::{Gui, LayoutKindId};

/// Handles of the built-in layout kinds in one [`Gui`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layouts {
    pub free: LayoutKindId,
    pub column: LayoutKindId,
}

/// Registers [`FreeLayout`] and [`ColumnLayout`].
pub fn register_layouts(gui: &mut Gui) -> Layouts {
    Layouts {
        free: gui.register_layout_kind(FreeLayout),
        column: gui.register_layout_kind(ColumnLayout),
    }
}

pub mod prelude {
    pub use crate::column::{ColumnConfig, ColumnLayout};
    pub use crate::free::{FreeLayout, FreeLayoutConfig};
    pub use crate::{register_layouts, Layouts};
}
