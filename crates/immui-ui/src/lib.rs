//! Default widget kinds for immui and the [`Ui`] helpers that declare them.

pub mod style;
mod ui;
pub mod widgets;

pub use style::WidgetStyle;
pub use ui::{register_default_widgets, DefaultWidgets, Ui};

pub mod prelude {
    pub use crate::style::WidgetStyle;
    pub use crate::ui::{register_default_widgets, DefaultWidgets, Ui};
    pub use crate::widgets::{
        ButtonState, CheckboxState, LabelState, SliderState, TextInputState,
    };
    pub use immui_core::prelude::*;
    pub use immui_ui_graphics::{Alignment, Color, Coordinate, Dimension, Rect};
    pub use immui_ui_layout::prelude::*;
}

#[cfg(test)]
#[path = "tests/widget_kind_tests.rs"]
mod widget_kind_tests;
